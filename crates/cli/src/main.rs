use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comicvine_api::{ComicVineClient, ComicVineConfig};
use comicvine_mcp::{ComicsMcpCore, McpHttpServer, ToolOutput, ToolRegistry, resolve_bind_address, serve_stdio};
use serde_json::{Map, Value, json};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "comicvine", version, about = "Comic Vine tool server for MCP clients")]
struct Cli {
    /// Comic Vine API key. Overrides COMIC_VINE_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Comic Vine API base URL. Overrides COMIC_VINE_API_BASE.
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the tools over stdio, or over streamable HTTP with --http.
    Serve {
        /// Loopback address to serve HTTP on, e.g. 127.0.0.1:8080.
        #[arg(long, value_name = "ADDR", num_args = 0..=1, default_missing_value = comicvine_mcp::server::DEFAULT_BIND_ADDRESS)]
        http: Option<String>,
    },
    /// Print the tool catalogue as JSON.
    Tools,
    /// Invoke one tool and print its result.
    Call {
        tool: String,
        /// Arguments as a JSON object.
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Listing the catalogue needs no credentials.
    if let Some(Command::Tools) = cli.command {
        return print_tools();
    }

    let config = ComicVineConfig::resolve(cli.api_key, cli.api_base).context("invalid Comic Vine configuration")?;
    info!(base_url = config.base_url(), "using Comic Vine API");
    let client = ComicVineClient::new(config).context("build Comic Vine client")?;
    let registry = Arc::new(ToolRegistry::new(client));

    match cli.command.unwrap_or(Command::Serve { http: None }) {
        Command::Serve { http: None } => serve_stdio(ComicsMcpCore::shared(registry)).await,
        Command::Serve { http: Some(address) } => serve_http(ComicsMcpCore::shared(registry), &address).await,
        Command::Call { tool, args } => call_tool(&registry, &tool, args.as_deref()).await,
        Command::Tools => print_tools(),
    }
}

/// Logs go to stderr; stdout carries the stdio JSON-RPC stream.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn serve_http(core: ComicsMcpCore<ComicVineClient>, address: &str) -> Result<()> {
    let bind_address = resolve_bind_address(Some(address))?;
    let running = McpHttpServer::new(bind_address, core).start().await?;
    eprintln!("MCP endpoint: http://{}/mcp", running.bound_address());

    tokio::signal::ctrl_c().await.context("wait for Ctrl-C")?;
    running.stop().await
}

async fn call_tool(registry: &ToolRegistry<ComicVineClient>, tool: &str, args: Option<&str>) -> Result<()> {
    let arguments = match args {
        Some(raw) => Some(
            serde_json::from_str::<Map<String, Value>>(raw).with_context(|| format!("--args must be a JSON object, got {raw}"))?,
        ),
        None => None,
    };

    match registry.call(tool, arguments).await.with_context(|| format!("{tool} failed"))? {
        ToolOutput::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ToolOutput::Html(digest) => {
            println!("{}", digest.html);
            eprintln!("{}", digest.message);
        }
    }
    Ok(())
}

fn print_tools() -> Result<()> {
    let tools: Vec<Value> = comicvine_mcp::registry::builtin_tools()
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "title": tool.title,
                "description": tool.description,
                "inputSchema": tool.input.schema(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
