//! Tool dispatch gateway.
//!
//! Routes (tool name, argument object) pairs to handlers, enforcing the
//! authentication gate and validating arguments against the catalog schema
//! once at this boundary. Every outcome - success or any error kind - is a
//! structured [`ToolResult`]; nothing escapes `dispatch` as a panic or a
//! raw error.

use crate::catalog;
use crate::tools;
use sellerlink_client::{ApiClient, ClientError, SessionManager};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one tool invocation: a textual payload and an error flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub text: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

pub struct Gateway {
    sessions: Arc<SessionManager>,
    api: ApiClient,
}

impl Gateway {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        let api = ApiClient::new(sessions.clone());
        Self { sessions, api }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub async fn dispatch(&self, tool_name: &str, arguments: Option<&Value>) -> ToolResult {
        let Some(spec) = catalog::find(tool_name) else {
            return ToolResult::error(format!("Unknown tool: {tool_name}"));
        };

        let args = match spec.validate(arguments) {
            Ok(args) => args,
            Err(msg) => return ToolResult::error(msg),
        };
        // seller_id is a required string in every catalog entry.
        let seller_id = args
            .get("seller_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        info!(tool = tool_name, seller_id, "dispatching tool");
        match tool_name {
            // Auth tools bypass the authentication gate.
            "authenticate" => self.handle_authenticate(&seller_id, &args).await,
            "status" => match tools::account::status(&self.api, &seller_id).await {
                Ok(text) => ToolResult::ok(text),
                Err(e) => render_error(tool_name, &e),
            },
            _ => {
                if !self.sessions.is_authenticated(&seller_id).await {
                    return ToolResult::error(format!(
                        "Seller {seller_id} is not authenticated. Call the authenticate tool first."
                    ));
                }
                match self.run_handler(tool_name, &seller_id, &args).await {
                    Ok(text) => ToolResult::ok(text),
                    Err(e) => render_error(tool_name, &e),
                }
            }
        }
    }

    async fn handle_authenticate(&self, seller_id: &str, args: &Map<String, Value>) -> ToolResult {
        let api_key = args.get("api_key").and_then(Value::as_str).unwrap_or_default();
        let api_secret = args.get("api_secret").and_then(Value::as_str).unwrap_or_default();
        match self.sessions.authenticate(seller_id, api_key, api_secret).await {
            Ok(session) => ToolResult::ok(format!(
                "Authenticated seller {} successfully. The session will refresh automatically when it expires.",
                session.seller_id
            )),
            Err(e) => render_error("authenticate", &e),
        }
    }

    async fn run_handler(
        &self,
        tool_name: &str,
        seller_id: &str,
        args: &Map<String, Value>,
    ) -> Result<String, ClientError> {
        let api = &self.api;
        match tool_name {
            "list_products" => tools::products::list_products(api, seller_id, args).await,
            "get_product" => tools::products::get_product(api, seller_id, args).await,
            "create_product" => tools::products::create_product(api, seller_id, args).await,
            "update_product" => tools::products::update_product(api, seller_id, args).await,
            "update_inventory" => tools::products::update_inventory(api, seller_id, args).await,
            "list_orders" => tools::orders::list_orders(api, seller_id, args).await,
            "get_order" => tools::orders::get_order(api, seller_id, args).await,
            "update_order_status" => tools::orders::update_order_status(api, seller_id, args).await,
            "get_returns" => tools::returns::get_returns(api, seller_id, args).await,
            "process_return" => tools::returns::process_return(api, seller_id, args).await,
            "get_analytics" => tools::analytics::get_analytics(api, seller_id, args).await,
            // Unreachable: every catalog entry is matched above.
            other => Err(ClientError::Api {
                status: None,
                message: format!("no handler for tool {other}"),
            }),
        }
    }
}

fn render_error(tool_name: &str, error: &ClientError) -> ToolResult {
    warn!(tool = tool_name, error = %error, "tool failed");
    match error {
        ClientError::NotAuthenticated => ToolResult::error(
            "Not authenticated. Call the authenticate tool with your API credentials.",
        ),
        ClientError::Auth(msg) => ToolResult::error(format!("Authentication failed: {msg}")),
        ClientError::Api { message, .. } => ToolResult::error(format!("API call failed: {message}")),
        ClientError::Transport(e) => ToolResult::error(format!("API call failed: {e}")),
        // Generic message only; internal detail stays in the logs.
        ClientError::Store(_) => ToolResult::error("Internal error while accessing session storage."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use httpmock::prelude::*;
    use sellerlink_core::{Session, TokenStore};
    use sellerlink_store::MemoryTokenStore;
    use serde_json::json;

    fn gateway(base_url: String) -> (Gateway, Arc<MemoryTokenStore>) {
        let memory = Arc::new(MemoryTokenStore::new());
        let sessions = Arc::new(SessionManager::new(memory.clone(), base_url));
        (Gateway::new(sessions), memory)
    }

    async fn seed_session(memory: &MemoryTokenStore, seller_id: &str, token: &str) {
        memory
            .put(
                seller_id,
                &Session {
                    access_token: Some(token.to_string()),
                    refresh_token: Some("R1".to_string()),
                    expires_at: Some(Utc::now() + Duration::hours(1)),
                    seller_id: seller_id.to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_tool_is_an_error_result() {
        let (gw, _) = gateway("http://127.0.0.1:1".to_string());
        let result = gw.dispatch("teleport", Some(&json!({}))).await;
        assert!(result.is_error);
        assert_eq!(result.text, "Unknown tool: teleport");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_seller_id_fails_validation_without_network() {
        // Unreachable base URL: any network attempt would change the message.
        let (gw, _) = gateway("http://127.0.0.1:1".to_string());
        let result = gw.dispatch("get_order", Some(&json!({}))).await;
        assert!(result.is_error);
        assert_eq!(result.text, "Missing required argument: seller_id");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unauthenticated_seller_is_gated() {
        let (gw, _) = gateway("http://127.0.0.1:1".to_string());
        let result = gw
            .dispatch("list_products", Some(&json!({ "seller_id": "S1" })))
            .await;
        assert!(result.is_error);
        assert!(result.text.contains("not authenticated"));
        assert!(result.text.contains("authenticate"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn authenticate_then_list_products_uses_issued_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(200).json_body(json!({
                "access_token": "T1", "refresh_token": "R1", "expires_in": 3600
            }));
        });
        let products = server.mock(|when, then| {
            when.method(GET)
                .path("/products")
                .header("authorization", "Bearer T1");
            then.status(200).json_body(json!({
                "products": [{
                    "id": "P1", "sku": "KU-1", "name": "Cotton Kurta", "brand": "Acme",
                    "category": "apparel", "mrp": 799, "selling_price": 499,
                    "inventory": 12, "status": "active"
                }]
            }));
        });

        let (gw, _) = gateway(server.base_url());
        let auth = gw
            .dispatch(
                "authenticate",
                Some(&json!({ "seller_id": "S1", "api_key": "k", "api_secret": "s" })),
            )
            .await;
        assert!(!auth.is_error, "{}", auth.text);
        assert!(auth.text.contains("Authenticated seller S1"));

        let result = gw
            .dispatch("list_products", Some(&json!({ "seller_id": "S1" })))
            .await;
        assert!(!result.is_error, "{}", result.text);
        assert!(result.text.contains("Found 1 products (seller S1):"));
        assert!(result.text.contains("Cotton Kurta (SKU: KU-1)"));
        assert!(result.text.contains("Price: \u{20b9}499 (MRP \u{20b9}799)"));
        products.assert();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_authentication_renders_remote_detail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(401).json_body(json!({ "message": "invalid api key" }));
        });

        let (gw, memory) = gateway(server.base_url());
        let result = gw
            .dispatch(
                "authenticate",
                Some(&json!({ "seller_id": "S1", "api_key": "bad", "api_secret": "s" })),
            )
            .await;
        assert!(result.is_error);
        assert_eq!(result.text, "Authentication failed: invalid api key");
        assert!(memory.get("S1").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_order_status_omits_tracking_line_when_absent() {
        let server = MockServer::start();
        let status_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orders/O1/status")
                .json_body(json!({ "status": "shipped" }));
            then.status(200).json_body(json!({ "success": true }));
        });

        let (gw, memory) = gateway(server.base_url());
        seed_session(&memory, "S1", "T1").await;

        let result = gw
            .dispatch(
                "update_order_status",
                Some(&json!({ "seller_id": "S1", "order_id": "O1", "status": "shipped" })),
            )
            .await;
        assert!(!result.is_error, "{}", result.text);
        assert!(result.text.contains("Order O1 updated to 'shipped'."));
        assert!(!result.text.contains("Tracking:"));
        status_mock.assert();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_order_status_includes_tracking_when_given() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orders/O1/status").json_body(json!({
                "status": "shipped", "tracking_id": "TRK9", "courier_partner": "Delhivery"
            }));
            then.status(200).json_body(json!({ "success": true }));
        });

        let (gw, memory) = gateway(server.base_url());
        seed_session(&memory, "S1", "T1").await;

        let result = gw
            .dispatch(
                "update_order_status",
                Some(&json!({
                    "seller_id": "S1", "order_id": "O1", "status": "shipped",
                    "tracking_id": "TRK9", "courier_partner": "Delhivery"
                })),
            )
            .await;
        assert!(!result.is_error, "{}", result.text);
        assert!(result.text.contains("Tracking: TRK9"));
        assert!(result.text.contains("Courier: Delhivery"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn status_degrades_when_account_info_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/account/info");
            then.status(500).json_body(json!({ "message": "backend down" }));
        });

        let (gw, memory) = gateway(server.base_url());
        seed_session(&memory, "S1", "T1").await;

        let result = gw.dispatch("status", Some(&json!({ "seller_id": "S1" }))).await;
        assert!(!result.is_error, "degraded status must not be an error");
        assert!(result.text.contains("Seller S1 is authenticated."));
        assert!(result.text.contains("Account details unavailable"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn status_reports_unauthenticated_without_remote_call() {
        let (gw, _) = gateway("http://127.0.0.1:1".to_string());
        let result = gw.dispatch("status", Some(&json!({ "seller_id": "S1" }))).await;
        assert!(!result.is_error);
        assert!(result.text.contains("not authenticated"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn api_errors_keep_the_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/orders/O404");
            then.status(404).json_body(json!({ "message": "order not found" }));
        });

        let (gw, memory) = gateway(server.base_url());
        seed_session(&memory, "S1", "T1").await;

        let result = gw
            .dispatch("get_order", Some(&json!({ "seller_id": "S1", "order_id": "O404" })))
            .await;
        assert!(result.is_error);
        assert_eq!(result.text, "API call failed: order not found");
        // The credential itself may still be valid.
        assert!(memory.get("S1").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn expired_session_refreshes_before_tool_runs() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(200).json_body(json!({
                "access_token": "T2", "refresh_token": "R2", "expires_in": 3600
            }));
        });
        let orders = server.mock(|when, then| {
            when.method(GET).path("/orders").header("authorization", "Bearer T2");
            then.status(200).json_body(json!({ "orders": [] }));
        });

        let (gw, memory) = gateway(server.base_url());
        memory
            .put(
                "S1",
                &Session {
                    access_token: Some("T1".to_string()),
                    refresh_token: Some("R1".to_string()),
                    expires_at: Some(Utc::now() - Duration::seconds(5)),
                    seller_id: "S1".to_string(),
                },
            )
            .await
            .unwrap();

        let result = gw
            .dispatch("list_orders", Some(&json!({ "seller_id": "S1" })))
            .await;
        assert!(!result.is_error, "{}", result.text);
        assert!(result.text.contains("No orders found"));
        orders.assert();
    }
}
