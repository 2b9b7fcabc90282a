//! Single-description lookup.

use crate::catalog::Catalog;
use crate::index::Format;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindDirectiveRequest {
    /// Directive name (e.g., "listen", "allow")
    pub name: String,
    /// Owning module; when omitted the first module defining the name is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Rendering of the description: html (default) or markdown
    #[serde(default)]
    pub format: Format,
}

/// Return a directive's description, or a "not found" message.
pub fn handle_find_directive(
    catalog: &Catalog,
    request: FindDirectiveRequest,
) -> Result<String, String> {
    let index = catalog.index();
    let module = request.module.as_deref();

    if let Some(description) = index.find(&request.name, module, request.format) {
        return Ok(description.to_string());
    }

    let defined_in = index.modules_defining(&request.name);
    if defined_in.is_empty() {
        Ok(format!("No such directive `{}`\n", request.name))
    } else {
        Ok(format!(
            "Directive `{}` not found in module `{}`. Defined in: {}\n",
            request.name,
            module.unwrap_or_default(),
            defined_in.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::highlight::Classifier;
    use assert2::check;

    fn catalog() -> Catalog {
        Catalog::build(&Dataset::bundled().unwrap(), Classifier::default()).unwrap()
    }

    #[test]
    fn test_wrong_module_lists_alternatives() {
        let output = handle_find_directive(
            &catalog(),
            FindDirectiveRequest {
                name: "listen".to_string(),
                module: Some("ngx_http_access_module".to_string()),
                format: Format::Html,
            },
        )
        .unwrap();
        check!(output.contains("ngx_http_core_module, ngx_stream_core_module"));
    }

    #[test]
    fn test_unknown_directive() {
        let output = handle_find_directive(
            &catalog(),
            FindDirectiveRequest {
                name: "proxy_pass".to_string(),
                module: None,
                format: Format::Markdown,
            },
        )
        .unwrap();
        check!(output == "No such directive `proxy_pass`\n");
    }
}
