//! Substring search over the module tree.

use crate::catalog::Catalog;
use crate::format::format_listing;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchDirectivesRequest {
    /// Case-insensitive substring of directive names; empty lists everything
    #[serde(default)]
    pub query: String,
}

/// Filter the alphabetized module tree by directive name.
pub fn handle_search_directives(
    catalog: &Catalog,
    request: SearchDirectivesRequest,
) -> Result<String, String> {
    let filtered = catalog.listing().filter(&request.query);
    tracing::debug!(
        "Search '{}' matched {} directives in {} modules",
        request.query,
        filtered.directive_count(),
        filtered.len()
    );
    Ok(format_listing(&filtered))
}
