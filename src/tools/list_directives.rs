//! Format-resolved directive listing.

use crate::catalog::Catalog;
use crate::format::format_directive_list;
use crate::index::Format;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListDirectivesRequest {
    /// Rendering for syntax forms: html (default) or markdown
    #[serde(default)]
    pub format: Format,
    /// Only list directives of this module (case-insensitive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// List directives in dataset order, optionally restricted to one module.
pub fn handle_list_directives(
    catalog: &Catalog,
    request: ListDirectivesRequest,
) -> Result<String, String> {
    let index = catalog.index();
    let directives = match request.module.as_deref().filter(|m| !m.is_empty()) {
        Some(module) => {
            let directives = index.list_module(module, request.format);
            if directives.is_empty() {
                return Ok(format!("No such module `{}`\n", module));
            }
            directives
        }
        None => index.list(request.format),
    };

    let mut output = match catalog.version() {
        Some(version) => format!("{} directives (reference {}):\n\n", directives.len(), version),
        None => format!("{} directives:\n\n", directives.len()),
    };
    output.push_str(&format_directive_list(&directives));
    Ok(output)
}
