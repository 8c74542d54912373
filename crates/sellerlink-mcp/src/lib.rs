//! MCP-facing surface: the static tool catalog, the dispatch gateway that
//! gates every non-auth tool behind a valid session, and the JSON-RPC
//! serving loops (stdio and HTTP).

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod jsonrpc;
pub mod protocol;
pub mod server;
pub mod tools;

pub use catalog::{catalog, ToolSpec};
pub use error::{McpError, McpResult};
pub use gateway::{Gateway, ToolResult};
pub use server::{serve_http, serve_stdio, McpServer};
