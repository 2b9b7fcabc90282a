//! Alphabetized module tree and substring filtering for browse views.

use crate::index::ReferenceIndex;
use serde::Serialize;
use std::collections::BTreeMap;

/// One module and its directive names, both sorted.
///
/// Directive names keep their dataset spelling but are ordered ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    pub name: String,
    pub directives: Vec<String>,
}

impl ModuleEntry {
    pub fn count(&self) -> usize {
        self.directives.len()
    }
}

/// Modules sorted by name, each with its sorted directive names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleListing {
    modules: Vec<ModuleEntry>,
}

impl ModuleListing {
    /// Project the index into an alphabetized module tree.
    pub fn from_index(index: &ReferenceIndex) -> Self {
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for record in index.records() {
            grouped
                .entry(record.module.as_str())
                .or_default()
                .push(record.name.clone());
        }

        let modules = grouped
            .into_iter()
            .map(|(name, mut directives)| {
                directives.sort_by_cached_key(|d| d.to_lowercase());
                ModuleEntry {
                    name: name.to_string(),
                    directives,
                }
            })
            .collect();

        Self { modules }
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// No modules at all. After [`filter`](Self::filter) this means "no matches".
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Total directive names across all modules.
    pub fn directive_count(&self) -> usize {
        self.modules.iter().map(ModuleEntry::count).sum()
    }

    /// Keep directives whose lowercase name contains the lowercase query.
    ///
    /// A blank query returns the full listing. Modules left without directives
    /// are dropped; surviving entries keep their alphabetical order.
    pub fn filter(&self, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return self.clone();
        }

        let needle = query.to_lowercase();
        let modules = self
            .modules
            .iter()
            .filter_map(|module| {
                let matches: Vec<String> = module
                    .directives
                    .iter()
                    .filter(|d| d.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
                (!matches.is_empty()).then(|| ModuleEntry {
                    name: module.name.clone(),
                    directives: matches,
                })
            })
            .collect();

        Self { modules }
    }
}
