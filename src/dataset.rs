//! Raw directive dataset parsing and normalization.
//!
//! The dataset arrives as a fixed JSON document (`{ version?, modules: [...] }`).
//! [`load`] flattens it into [`DirectiveRecord`]s, pairing every directive with
//! its owning module and rejecting data that breaks the catalog's invariants.

use crate::error::{DataIntegrityError, Result};
use ahash::AHashSet;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dataset compiled into the binary, used when no dataset path is configured.
pub const BUNDLED_JSON: &str = include_str!("../data/reference.json");

/// The raw dataset as it is shipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Upstream documentation version the dataset was generated from.
    #[serde(default)]
    pub version: Option<String>,
    pub modules: Vec<RawModule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModule {
    /// Link to the module's documentation page.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// `null` means the module documents no directives.
    #[serde(default)]
    pub directives: Option<Vec<RawDirective>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDirective {
    pub name: String,
    pub description_html: String,
    pub description_md: String,
    pub syntax_html: Vec<String>,
    pub syntax_md: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(rename = "isBlock", default)]
    pub is_block: bool,
    #[serde(default)]
    pub default: Option<String>,
}

/// A directive paired with its owning module. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveRecord {
    pub name: String,
    pub module: String,
    pub description_html: String,
    pub description_markdown: String,
    pub syntax_html: Vec<String>,
    pub syntax_markdown: Vec<String>,
    pub contexts: Vec<String>,
    pub is_block: bool,
    pub default_value: Option<String>,
}

impl DirectiveRecord {
    /// Check whether the directive is legal in the given context.
    pub fn allowed_in(&self, context: &str) -> bool {
        self.contexts.iter().any(|c| c == context)
    }
}

/// Module-level metadata that survives flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub id: Option<String>,
    pub directive_count: usize,
}

impl Dataset {
    /// Parse a dataset from its JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset at {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse dataset at {}", path.display()))
    }

    /// The dataset shipped with the crate.
    pub fn bundled() -> serde_json::Result<Self> {
        Self::from_json(BUNDLED_JSON)
    }

    /// Module metadata in dataset order, including modules without directives.
    pub fn module_info(&self) -> Vec<ModuleInfo> {
        self.modules
            .iter()
            .map(|m| ModuleInfo {
                name: m.name.clone(),
                id: m.id.clone(),
                directive_count: m.directives.as_ref().map_or(0, Vec::len),
            })
            .collect()
    }
}

/// Flatten a dataset into directive records.
///
/// Records come out in dataset order: modules in input order, then directives
/// in their order within the module. That order is what makes "first match
/// wins" lookups reproducible.
pub fn load(dataset: &Dataset) -> std::result::Result<Vec<DirectiveRecord>, DataIntegrityError> {
    let mut records = Vec::new();
    let mut seen: AHashSet<(&str, &str)> = AHashSet::new();

    for module in &dataset.modules {
        let Some(directives) = &module.directives else {
            tracing::debug!("Module '{}' has no directives", module.name);
            continue;
        };

        for directive in directives {
            if !seen.insert((directive.name.as_str(), module.name.as_str())) {
                tracing::warn!(
                    "Duplicate directive '{}' in module '{}'",
                    directive.name,
                    module.name
                );
                return Err(DataIntegrityError::DuplicateDirective {
                    name: directive.name.clone(),
                    module: module.name.clone(),
                });
            }

            if directive.syntax_html.len() != directive.syntax_md.len() {
                tracing::warn!(
                    "Syntax form count mismatch for '{}' in module '{}'",
                    directive.name,
                    module.name
                );
                return Err(DataIntegrityError::SyntaxFormMismatch {
                    name: directive.name.clone(),
                    module: module.name.clone(),
                    html: directive.syntax_html.len(),
                    markdown: directive.syntax_md.len(),
                });
            }

            records.push(DirectiveRecord {
                name: directive.name.clone(),
                module: module.name.clone(),
                description_html: directive.description_html.clone(),
                description_markdown: directive.description_md.clone(),
                syntax_html: directive.syntax_html.clone(),
                syntax_markdown: directive.syntax_md.clone(),
                contexts: directive.contexts.clone(),
                is_block: directive.is_block,
                // The generator writes "" for directives without a default
                default_value: directive.default.clone().filter(|d| !d.is_empty()),
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn directive(name: &str, html: usize, md: usize) -> RawDirective {
        RawDirective {
            name: name.to_string(),
            description_html: format!("<p>{name}</p>"),
            description_md: name.to_string(),
            syntax_html: vec!["<i>x</i>".to_string(); html],
            syntax_md: vec!["*x*".to_string(); md],
            contexts: vec!["http".to_string()],
            is_block: false,
            default: None,
        }
    }

    fn module(name: &str, directives: Option<Vec<RawDirective>>) -> RawModule {
        RawModule {
            id: None,
            name: name.to_string(),
            directives,
        }
    }

    #[test]
    fn test_null_directives_contribute_nothing() {
        let dataset = Dataset {
            version: None,
            modules: vec![
                module("empty", None),
                module("m", Some(vec![directive("a", 1, 1)])),
            ],
        };
        let records = load(&dataset).unwrap();
        check!(records.len() == 1);
        check!(records[0].module == "m");
    }

    #[test]
    fn test_records_keep_dataset_order() {
        let dataset = Dataset {
            version: None,
            modules: vec![
                module("m2", Some(vec![directive("z", 1, 1), directive("a", 1, 1)])),
                module("m1", Some(vec![directive("b", 1, 1)])),
            ],
        };
        let records = load(&dataset).unwrap();
        let order: Vec<_> = records
            .iter()
            .map(|r| (r.module.as_str(), r.name.as_str()))
            .collect();
        check!(order == vec![("m2", "z"), ("m2", "a"), ("m1", "b")]);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let dataset = Dataset {
            version: None,
            modules: vec![module(
                "m",
                Some(vec![directive("a", 1, 1), directive("a", 1, 1)]),
            )],
        };
        let_assert!(Err(err) = load(&dataset));
        check!(
            err == DataIntegrityError::DuplicateDirective {
                name: "a".to_string(),
                module: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_same_name_in_different_modules_allowed() {
        let dataset = Dataset {
            version: None,
            modules: vec![
                module("m1", Some(vec![directive("server", 1, 1)])),
                module("m2", Some(vec![directive("server", 1, 1)])),
            ],
        };
        check!(load(&dataset).unwrap().len() == 2);
    }

    #[test]
    fn test_syntax_mismatch_rejected() {
        let dataset = Dataset {
            version: None,
            modules: vec![module("m", Some(vec![directive("a", 2, 1)]))],
        };
        let_assert!(Err(DataIntegrityError::SyntaxFormMismatch { html, markdown, .. }) = load(&dataset));
        check!(html == 2);
        check!(markdown == 1);
    }

    #[test]
    fn test_empty_default_is_absent() {
        let mut d = directive("a", 1, 1);
        d.default = Some(String::new());
        let dataset = Dataset {
            version: None,
            modules: vec![module("m", Some(vec![d]))],
        };
        check!(load(&dataset).unwrap()[0].default_value.is_none());
    }

    #[test]
    fn test_parse_raw_shape() {
        let json = r#"{
            "modules": [
                { "name": "ngx_http_access_module", "directives": [{
                    "name": "allow",
                    "description_html": "<p>Allows access.</p>",
                    "description_md": "Allows access.",
                    "syntax_html": ["<i>address</i>"],
                    "syntax_md": ["*address*"],
                    "contexts": ["http", "server"],
                    "isBlock": false
                }] },
                { "name": "ngx_http_status_module", "directives": null }
            ]
        }"#;
        let dataset = Dataset::from_json(json).unwrap();
        check!(dataset.version.is_none());
        check!(dataset.modules.len() == 2);

        let info = dataset.module_info();
        check!(info[0].directive_count == 1);
        check!(info[1].directive_count == 0);

        let records = load(&dataset).unwrap();
        check!(records[0].allowed_in("server"));
        check!(!records[0].allowed_in("main"));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let dataset = Dataset::bundled().unwrap();
        check!(dataset.version.is_some());
        let records = load(&dataset).unwrap();
        check!(!records.is_empty());
        for record in &records {
            check!(record.syntax_html.len() == record.syntax_markdown.len());
        }
    }
}
