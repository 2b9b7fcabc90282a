//! Name and module indices over loaded directive records.

use crate::dataset::DirectiveRecord;
use ahash::AHashMap;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Which rendering of a directive's prose and syntax to return.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Markdown,
}

/// A directive projected into a single format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDirective {
    pub name: String,
    pub module: String,
    pub description: String,
    pub syntax: Vec<String>,
    pub contexts: Vec<String>,
    pub is_block: bool,
    pub default: Option<String>,
}

impl ResolvedDirective {
    fn project(record: &DirectiveRecord, format: Format) -> Self {
        Self {
            name: record.name.clone(),
            module: record.module.clone(),
            description: description(record, format).to_string(),
            syntax: syntax(record, format).to_vec(),
            contexts: record.contexts.clone(),
            is_block: record.is_block,
            default: record.default_value.clone(),
        }
    }
}

/// Select the description rendering for `format`.
pub fn description(record: &DirectiveRecord, format: Format) -> &str {
    match format {
        Format::Html => &record.description_html,
        Format::Markdown => &record.description_markdown,
    }
}

/// Select the syntax renderings for `format`.
pub fn syntax(record: &DirectiveRecord, format: Format) -> &[String] {
    match format {
        Format::Html => &record.syntax_html,
        Format::Markdown => &record.syntax_markdown,
    }
}

/// Read-only lookup structure over all directive records.
///
/// Directive names are not unique across modules, so `by_name` maps each name to
/// every record carrying it, in load order. Lookups without a module resolve to
/// the first of those: the first-loaded module wins.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    records: Vec<DirectiveRecord>,
    by_name: AHashMap<String, Vec<usize>>,
    by_module: AHashMap<String, Vec<usize>>,
    /// Module names in first-seen order
    modules: Vec<String>,
}

impl ReferenceIndex {
    /// Build both indices from records in load order.
    pub fn new(records: Vec<DirectiveRecord>) -> Self {
        let mut by_name: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut by_module: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut modules = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            by_name.entry(record.name.clone()).or_default().push(idx);
            by_module
                .entry(record.module.clone())
                .or_insert_with(|| {
                    modules.push(record.module.clone());
                    Vec::new()
                })
                .push(idx);
        }

        Self {
            records,
            by_name,
            by_module,
            modules,
        }
    }

    /// All records in load order.
    pub fn records(&self) -> &[DirectiveRecord] {
        &self.records
    }

    /// Module names in load order.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every directive projected into `format`, in load order.
    pub fn list(&self, format: Format) -> Vec<ResolvedDirective> {
        self.records
            .iter()
            .map(|r| ResolvedDirective::project(r, format))
            .collect()
    }

    /// Directives of one module projected into `format`, in load order.
    ///
    /// The module is matched case-insensitively.
    pub fn list_module(&self, module: &str, format: Format) -> Vec<ResolvedDirective> {
        let Some(indices) = self
            .resolve_module(module)
            .and_then(|name| self.by_module.get(name))
        else {
            return vec![];
        };
        indices
            .iter()
            .map(|&idx| ResolvedDirective::project(&self.records[idx], format))
            .collect()
    }

    /// Resolve a directive's description.
    ///
    /// With a non-empty `module`, the module is compared case-insensitively and
    /// must match. Without one, the first record loaded under `name` is used.
    pub fn find(&self, name: &str, module: Option<&str>, format: Format) -> Option<&str> {
        self.find_record(name, module)
            .map(|record| description(record, format))
    }

    /// Record lookup behind [`find`](Self::find).
    pub fn find_record(&self, name: &str, module: Option<&str>) -> Option<&DirectiveRecord> {
        let mut candidates = self
            .by_name
            .get(name)?
            .iter()
            .map(|&idx| &self.records[idx]);

        let found = match module.filter(|m| !m.is_empty()) {
            Some(module) => {
                let wanted = module.to_uppercase();
                candidates.find(|r| r.module.to_uppercase() == wanted)
            }
            None => candidates.next(),
        };

        if found.is_none() {
            tracing::debug!("No directive '{}' (module: {:?})", name, module);
        }
        found
    }

    /// Exact structural lookup used by detail views.
    pub fn by_module_and_name(&self, module: &str, name: &str) -> Option<&DirectiveRecord> {
        self.by_module
            .get(module)?
            .iter()
            .map(|&idx| &self.records[idx])
            .find(|r| r.name == name)
    }

    /// Check whether a module (exact name) has any directives.
    pub fn has_module(&self, module: &str) -> bool {
        self.by_module.contains_key(module)
    }

    /// Every module that defines `name`, in load order.
    pub fn modules_defining(&self, name: &str) -> Vec<&str> {
        self.by_name.get(name).map_or_else(Vec::new, |indices| {
            indices
                .iter()
                .map(|&idx| self.records[idx].module.as_str())
                .collect()
        })
    }

    fn resolve_module(&self, module: &str) -> Option<&String> {
        if let Some((name, _)) = self.by_module.get_key_value(module) {
            return Some(name);
        }
        let wanted = module.to_uppercase();
        self.modules.iter().find(|m| m.to_uppercase() == wanted)
    }
}
