//! Directive detail view.

use crate::catalog::Catalog;
use crate::format::format_directive;
use crate::index::Format;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectDirectiveRequest {
    /// Exact module name (e.g., "ngx_http_core_module")
    pub module: String,
    /// Exact directive name
    pub name: String,
    /// Rendering of syntax and description: html (default) or markdown
    #[serde(default)]
    pub format: Format,
}

/// Render a directive's syntax, default, contexts and description.
pub fn handle_inspect_directive(
    catalog: &Catalog,
    request: InspectDirectiveRequest,
) -> Result<String, String> {
    let index = catalog.index();
    if !index.has_module(&request.module) {
        return Ok(format!("No such module `{}`\n", request.module));
    }

    match index.by_module_and_name(&request.module, &request.name) {
        Some(record) => Ok(format_directive(record, request.format)),
        None => Ok(format!("No such directive `{}`\n", request.name)),
    }
}
