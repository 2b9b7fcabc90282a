//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for directive-ref operations at the process edges
/// (configuration, file reads, server startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a dataset violates the catalog's integrity rules.
///
/// Only the loader produces this. Lookups never fail; a miss is an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    /// The same `(name, module)` pair appears more than once.
    #[error("Duplicate directive '{name}' in module '{module}'")]
    DuplicateDirective { name: String, module: String },

    /// The HTML and Markdown syntax lists describe a different number of forms.
    #[error(
        "Directive '{name}' in module '{module}' has {html} HTML syntax forms but {markdown} Markdown syntax forms"
    )]
    SyntaxFormMismatch {
        name: String,
        module: String,
        html: usize,
        markdown: usize,
    },
}

/// Error returned when a catalog cannot be built from a dataset.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Integrity(#[from] DataIntegrityError),

    /// A token class pattern failed to compile.
    #[error("Failed to compile highlight pattern: {0}")]
    Pattern(#[from] regex::Error),
}
