//! MCP server exposing the directive catalog to editor clients.

use crate::catalog::{Catalog, SharedCatalog};
use crate::config::Config;
use crate::tools::find_directive::{FindDirectiveRequest, handle_find_directive};
use crate::tools::highlight_rules::{HighlightRulesRequest, handle_highlight_rules};
use crate::tools::inspect_directive::{InspectDirectiveRequest, handle_inspect_directive};
use crate::tools::list_directives::{ListDirectivesRequest, handle_list_directives};
use crate::tools::search_directives::{SearchDirectivesRequest, handle_search_directives};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for directive reference queries
#[derive(Clone)]
pub struct DirectiveServer {
    /// Configuration the catalog is loaded from
    config: Arc<Config>,

    /// Catalog slot, filled on first use or by [`preload`](Self::preload)
    catalog: Arc<SharedCatalog>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DirectiveServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveServer")
            .field("config", &self.config)
            .field("loaded", &self.catalog.get().is_some())
            .finish()
    }
}

#[tool_router]
impl DirectiveServer {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(SharedCatalog::new()),
            tool_router: Self::tool_router(),
        }
    }

    /// The catalog, loading it on first access.
    pub fn catalog(&self) -> Result<Arc<Catalog>, String> {
        self.catalog
            .get_or_load(|| Catalog::from_config(&self.config))
            .map_err(|e| format!("Failed to load directive reference: {:#}", e))
    }

    /// Load the catalog eagerly so the first tool call does not pay for it.
    pub fn preload(&self) -> Result<(), String> {
        self.catalog().map(|_| ())
    }

    #[tool(
        description = "List configuration directives in dataset order with their module and first syntax form. Optionally restrict to one module and choose html or markdown syntax.",
        input_schema = inline_schema_for_type::<ListDirectivesRequest>()
    )]
    async fn list_directives(
        &self,
        Parameters(request): Parameters<ListDirectivesRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.catalog()?;
        handle_list_directives(&catalog, request)
    }

    #[tool(
        description = "Get the description of a directive by name. Without a module, the first module that defines the name is used. Module matching is case-insensitive.",
        input_schema = inline_schema_for_type::<FindDirectiveRequest>()
    )]
    async fn find_directive(
        &self,
        Parameters(request): Parameters<FindDirectiveRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.catalog()?;
        handle_find_directive(&catalog, request)
    }

    #[tool(
        description = "Show a directive's full reference entry: syntax forms, default value, allowed contexts and description.",
        input_schema = inline_schema_for_type::<InspectDirectiveRequest>()
    )]
    async fn inspect_directive(
        &self,
        Parameters(request): Parameters<InspectDirectiveRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.catalog()?;
        handle_inspect_directive(&catalog, request)
    }

    #[tool(
        description = "Search directive names by case-insensitive substring. Returns matching directives grouped by module, alphabetized.",
        input_schema = inline_schema_for_type::<SearchDirectivesRequest>()
    )]
    async fn search_directives(
        &self,
        Parameters(request): Parameters<SearchDirectivesRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.catalog()?;
        handle_search_directives(&catalog, request)
    }

    #[tool(
        description = "Export syntax highlighting rules: one line-anchored pattern per token class (top-level, top-level block, nested block, plain directive), optionally with theme colours.",
        input_schema = inline_schema_for_type::<HighlightRulesRequest>()
    )]
    async fn highlight_rules(
        &self,
        Parameters(request): Parameters<HighlightRulesRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.catalog()?;
        handle_highlight_rules(&catalog, request)
    }
}

#[tool_handler]
impl ServerHandler for DirectiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "directive-ref: configuration directive reference. \
                 Use search_directives to browse, find_directive or inspect_directive for details, \
                 and highlight_rules for editor syntax highlighting."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value")
    };

    Arc::new(json_object)
}
