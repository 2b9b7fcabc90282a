use directive_ref::config::Config;
use directive_ref::server::DirectiveServer;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    directive_ref::tracing::init();

    let config = Config::load()?;
    tracing::info!("Starting directive-ref MCP server");

    let server = DirectiveServer::new(config);
    // A bad dataset should be visible at startup, but tools report it again on use
    if let Err(e) = server.preload() {
        tracing::error!("{}", e);
    }

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
