//! Queryable reference for configuration directives.
//!
//! A static dataset of modules and their directives is loaded once into an
//! immutable [`Catalog`]: a name/module [`ReferenceIndex`] with format-aware
//! lookups, a [`TokenTable`] of highlighting patterns, and an alphabetized
//! [`ModuleListing`] for substring search.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod highlight;
pub mod index;
pub mod listing;
pub mod server;
pub mod tools;
pub mod tracing;

pub use catalog::{Catalog, SharedCatalog};
pub use dataset::{Dataset, DirectiveRecord, ModuleInfo};
pub use error::{CatalogError, DataIntegrityError};
pub use highlight::{Classifier, TokenClass, TokenRule, TokenTable};
pub use index::{Format, ReferenceIndex, ResolvedDirective};
pub use listing::{ModuleEntry, ModuleListing};
