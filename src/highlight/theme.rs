//! Editor theme rules for the directive token labels.
//!
//! Serializes to the `{ base, inherit, colors, rules }` shape that Monaco-style
//! editors accept for standalone theme data.

use super::TokenClass;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub token: &'static str,
    pub foreground: &'static str,
    pub font_style: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub base: &'static str,
    pub inherit: bool,
    pub colors: BTreeMap<String, String>,
    pub rules: Vec<StyleRule>,
}

const fn foreground(class: TokenClass) -> &'static str {
    match class {
        TokenClass::TopLevel => "#B58440",
        TokenClass::TopLevelBlock => "#4071B5",
        TokenClass::NestedBlock => "#B540AB",
        TokenClass::PlainDirective => "#40b54a",
    }
}

impl Theme {
    /// Bold, per-class colours over the variant's base theme.
    pub fn new(variant: ThemeVariant) -> Self {
        let base = match variant {
            ThemeVariant::Light => "vs",
            ThemeVariant::Dark => "vs-dark",
        };
        Self {
            base,
            inherit: true,
            colors: BTreeMap::new(),
            rules: TokenClass::ALL
                .into_iter()
                .map(|class| StyleRule {
                    token: class.label(),
                    foreground: foreground(class),
                    font_style: "bold",
                })
                .collect(),
        }
    }

    pub fn rule(&self, class: TokenClass) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.token == class.label())
    }
}
