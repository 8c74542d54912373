//! JSON-RPC serving loops for the MCP channel.

use crate::jsonrpc::{
    self, failure, success, JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION,
};
use crate::protocol::{
    Implementation, InitializeRequest, InitializeResponse, ServerCapabilities, Tool,
    ToolsCallRequest, ToolsCallResponse, ToolsCapability, ToolsListResponse,
    LATEST_PROTOCOL_VERSION, METHOD_INITIALIZE, METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    SUPPORTED_PROTOCOL_VERSIONS,
};
use crate::{catalog, Gateway, McpError, McpResult};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

pub struct McpServer {
    gateway: Arc<Gateway>,
}

impl McpServer {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Process one JSON-RPC message; `None` for notifications.
    pub async fn process_message(&self, body: &[u8]) -> McpResult<Option<JsonRpcResponse>> {
        let request: JsonRpcRequest = serde_json::from_slice(body)?;

        if request.jsonrpc != JSONRPC_VERSION {
            return Ok(Some(failure(
                request.id,
                JsonRpcError::new(jsonrpc::INVALID_REQUEST, "Invalid Request")
                    .with_data(serde_json::json!({ "message": "Invalid JSON-RPC version" })),
            )));
        }

        // Notifications get no response.
        if request.id.is_none() {
            debug!(method = %request.method, "ignoring notification");
            return Ok(None);
        }

        let response = match request.method.as_str() {
            METHOD_INITIALIZE => self.handle_initialize(&request)?,
            METHOD_PING => success(request.id, serde_json::json!({})),
            METHOD_TOOLS_LIST => self.handle_tools_list(&request)?,
            METHOD_TOOLS_CALL => self.handle_tools_call(&request).await?,
            other => failure(
                request.id,
                JsonRpcError::new(jsonrpc::METHOD_NOT_FOUND, "Method not found")
                    .with_data(serde_json::json!({ "method": other })),
            ),
        };
        Ok(Some(response))
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidArguments("Missing params for initialize".to_string()))?;
        let init: InitializeRequest = serde_json::from_value(params.clone())?;

        let protocol_version = if SUPPORTED_PROTOCOL_VERSIONS.contains(&init.protocol_version.as_str())
        {
            init.protocol_version
        } else {
            LATEST_PROTOCOL_VERSION.to_string()
        };

        let response = InitializeResponse {
            protocol_version,
            capabilities: ServerCapabilities { tools: ToolsCapability { list_changed: None } },
            server_info: Implementation {
                name: "sellerlink".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "SellerLink - manage a seller-commerce account. Call authenticate first."
                    .to_string(),
            ),
        };
        Ok(success(request.id.clone(), serde_json::to_value(response)?))
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let tools = catalog::catalog()
            .iter()
            .map(|spec| Tool {
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                input_schema: spec.input_schema(),
            })
            .collect();
        let response = ToolsListResponse { tools, next_cursor: None };
        Ok(success(request.id.clone(), serde_json::to_value(response)?))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidArguments("Missing params for tools/call".to_string()))?;
        let call: ToolsCallRequest = serde_json::from_value(params.clone())?;

        let result = self.gateway.dispatch(&call.name, call.arguments.as_ref()).await;
        let response = ToolsCallResponse::text(result.text, result.is_error);
        Ok(success(request.id.clone(), serde_json::to_value(response)?))
    }
}

/// Serve MCP over stdio, one JSON-RPC message per line. Logging goes to
/// stderr; stdout carries only protocol traffic.
pub async fn serve_stdio(gateway: Arc<Gateway>) -> McpResult<()> {
    info!("starting MCP server (stdio)");
    let server = McpServer::new(gateway);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Batch requests are not part of MCP.
        if trimmed.starts_with('[') {
            let response = failure(
                None,
                JsonRpcError::new(jsonrpc::INVALID_REQUEST, "Invalid Request")
                    .with_data(serde_json::json!({ "message": "Batch requests are not supported" })),
            );
            write_line(&mut stdout, &response).await?;
            continue;
        }

        match server.process_message(trimmed.as_bytes()).await {
            Ok(Some(response)) => write_line(&mut stdout, &response).await?,
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "failed to process message");
                let response = failure(None, e.to_jsonrpc_error());
                write_line(&mut stdout, &response).await?;
            }
        }
    }

    info!("MCP server stopped");
    Ok(())
}

async fn write_line(
    stdout: &mut tokio::io::Stdout,
    response: &JsonRpcResponse,
) -> McpResult<()> {
    let mut buf = serde_json::to_vec(response)?;
    buf.push(b'\n');
    stdout.write_all(&buf).await?;
    stdout.flush().await?;
    Ok(())
}

/// Serve MCP over HTTP: JSON-RPC messages POSTed to `/mcp`.
pub async fn serve_http(gateway: Arc<Gateway>, addr: &str) -> McpResult<()> {
    use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
    use serde_json::Value;

    info!(addr, "starting MCP server (HTTP)");
    let server = Arc::new(McpServer::new(gateway));

    async fn handle(
        State(server): State<Arc<McpServer>>,
        body: axum::body::Bytes,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        match server.process_message(&body[..]).await {
            Ok(Some(response)) => Ok(Json(serde_json::to_value(response).unwrap_or_default())),
            Ok(None) => Ok(Json(serde_json::json!({}))),
            Err(e) => {
                error!(error = %e, "failed to process MCP request");
                let status = match e {
                    McpError::InvalidArguments(_) | McpError::Serialization(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let response = failure(None, e.to_jsonrpc_error());
                Err((status, Json(serde_json::to_value(response).unwrap_or_default())))
            }
        }
    }

    let app = Router::new().route("/mcp", post(handle)).with_state(server);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| McpError::Internal(format!("failed to bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| McpError::Internal(format!("HTTP server error: {e}")))?;
    Ok(())
}
