//! Authenticated outbound calls to the seller API.

use crate::session::remote_detail;
use crate::{ClientError, ClientResult, SessionManager};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Issues bearer-authenticated HTTP requests using the session manager's
/// current access token. No automatic retry; retry/backoff is a caller
/// concern.
#[derive(Clone)]
pub struct ApiClient {
    sessions: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Call `method path` with the seller's current token. `path` may carry
    /// a query string. Non-2xx and transport failures surface uniformly as
    /// [`ClientError::Api`] carrying the remote message when one exists.
    pub async fn call(
        &self,
        seller_id: &str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let token = self.sessions.access_token(seller_id).await?;
        let url = format!("{}{}", self.sessions.base_url, path);
        debug!(seller_id, %method, path, "outbound API call");

        let mut request = self.sessions.http.request(method, url).bearer_auth(token);
        if let Some(json) = body {
            request = request.json(json);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ClientError::api(
                Some(status.as_u16()),
                remote_detail(&text, &format!("HTTP {}", status.as_u16())),
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ClientError::api(Some(status.as_u16()), format!("unparseable response body: {e}"))
        })
    }
}
