//! Model Context Protocol surface for the Comic Vine query engine.
//!
//! [`registry`] declares the tools and validates their arguments;
//! [`server`] exposes the registry over stdio or loopback streamable HTTP.

mod instructions;
pub mod registry;
pub mod server;

pub use instructions::SERVER_INSTRUCTIONS;
pub use registry::{ToolDefinition, ToolOperation, ToolOutput, ToolRegistry};
pub use server::{ComicsMcpCore, McpHttpServer, RunningMcpHttpServer, resolve_bind_address, serve_stdio};
