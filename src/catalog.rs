//! The immutable directive catalog and its one-time publication.
//!
//! A [`Catalog`] bundles every structure derived from one dataset: the reference
//! index, the token table and the browse listing. It is built in one step and
//! never mutated; reloading means building a new catalog. [`SharedCatalog`]
//! guards the build so concurrent first callers publish exactly one catalog.

use crate::config::Config;
use crate::dataset::{Dataset, ModuleInfo};
use crate::error::{CatalogError, Result};
use crate::highlight::{Classifier, TokenTable};
use crate::index::ReferenceIndex;
use crate::listing::ModuleListing;
use anyhow::Context;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

#[derive(Debug, Clone)]
pub struct Catalog {
    version: Option<String>,
    modules: Vec<ModuleInfo>,
    index: ReferenceIndex,
    classifier: Classifier,
    tokens: TokenTable,
    listing: ModuleListing,
}

impl Catalog {
    /// Build every derived structure from `dataset`.
    ///
    /// Nothing is returned unless the whole dataset passes integrity checks.
    pub fn build(dataset: &Dataset, classifier: Classifier) -> std::result::Result<Self, CatalogError> {
        let start = std::time::Instant::now();

        let records = crate::dataset::load(dataset)?;
        let tokens = TokenTable::build(&classifier, &records)?;
        let index = ReferenceIndex::new(records);
        let listing = ModuleListing::from_index(&index);

        tracing::info!(
            "Loaded {} directives from {} modules in {:?}",
            index.len(),
            index.modules().len(),
            start.elapsed()
        );

        Ok(Self {
            version: dataset.version.clone(),
            modules: dataset.module_info(),
            index,
            classifier,
            tokens,
            listing,
        })
    }

    /// Build from the configured dataset, or the bundled one when none is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dataset = match &config.dataset {
            Some(path) => {
                tracing::info!("Loading dataset from {}", path.display());
                Dataset::from_path(path)?
            }
            None => Dataset::bundled().context("Failed to parse bundled dataset")?,
        };
        let classifier = Classifier::new(config.top_level_context.clone());
        Self::build(&dataset, classifier).context("Dataset failed integrity checks")
    }

    /// Upstream documentation version, if the dataset records one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Every module in dataset order, including modules without directives.
    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn listing(&self) -> &ModuleListing {
        &self.listing
    }
}

/// A catalog slot that is filled at most once.
///
/// Readers either see no catalog or a complete one. A failed build leaves the
/// slot empty so a later call may retry with a corrected dataset.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    cell: OnceLock<Arc<Catalog>>,
    init: Mutex<()>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published catalog, if any.
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.cell.get().cloned()
    }

    /// Return the published catalog, building it with `load` if needed.
    ///
    /// `load` runs at most once at a time; callers racing the first build wait
    /// for it and receive the same catalog.
    pub fn get_or_load<E>(
        &self,
        load: impl FnOnce() -> std::result::Result<Catalog, E>,
    ) -> std::result::Result<Arc<Catalog>, E> {
        if let Some(catalog) = self.cell.get() {
            return Ok(catalog.clone());
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.cell.get() {
            return Ok(catalog.clone());
        }

        let catalog = Arc::new(load()?);
        Ok(self.cell.get_or_init(|| catalog).clone())
    }
}
