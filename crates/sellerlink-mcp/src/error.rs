//! Errors at the MCP serving boundary.

use crate::jsonrpc::{self, JsonRpcError};
use thiserror::Error;

pub type McpResult<T> = Result<T, McpError>;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl McpError {
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            McpError::Serialization(e) => JsonRpcError::new(jsonrpc::PARSE_ERROR, "Parse error")
                .with_data(serde_json::json!({ "message": e.to_string() })),
            McpError::InvalidArguments(msg) => {
                JsonRpcError::new(jsonrpc::INVALID_PARAMS, "Invalid params")
                    .with_data(serde_json::json!({ "message": msg }))
            }
            _ => JsonRpcError::new(jsonrpc::INTERNAL_ERROR, "Internal error")
                .with_data(serde_json::json!({ "message": self.to_string() })),
        }
    }
}
