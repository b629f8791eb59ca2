mod core;
mod errors;
mod http;

use anyhow::{Context, Result};
use comicvine_api::ComicVineApi;
use rmcp::ServiceExt;
use tracing::info;

pub use self::core::ComicsMcpCore;
pub use errors::tool_error;
pub use http::{DEFAULT_BIND_ADDRESS, McpHttpServer, RunningMcpHttpServer, resolve_bind_address};

/// Serves `core` over stdin/stdout until the client disconnects.
pub async fn serve_stdio<A: ComicVineApi + 'static>(core: ComicsMcpCore<A>) -> Result<()> {
    info!("serving MCP over stdio");
    let service = core
        .serve(rmcp::transport::stdio())
        .await
        .context("start MCP stdio session")?;
    let reason = service.waiting().await.context("MCP stdio session ended abnormally")?;
    info!(?reason, "MCP stdio session closed");
    Ok(())
}
