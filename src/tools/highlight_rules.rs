//! Highlighter rule table export.

use crate::catalog::Catalog;
use crate::format::{format_theme, format_token_rules};
use crate::highlight::theme::{Theme, ThemeVariant};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct HighlightRulesRequest {
    /// Also emit style rules for the light or dark theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeVariant>,
}

/// Emit one `[/pattern/, "label"],` rule per token class.
pub fn handle_highlight_rules(
    catalog: &Catalog,
    request: HighlightRulesRequest,
) -> Result<String, String> {
    let mut output = format_token_rules(catalog.tokens());
    if let Some(variant) = request.theme {
        output.push('\n');
        output.push_str(&format_theme(&Theme::new(variant)));
    }
    Ok(output)
}
