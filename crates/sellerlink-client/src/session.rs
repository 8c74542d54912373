//! Per-seller session lifecycle: authenticate, refresh, revoke.

use crate::{ClientError, ClientResult};
use chrono::{Duration, Utc};
use sellerlink_core::{Session, TokenStore};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Token-issuance / refresh response from the remote API.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    expires_in: i64,
}

/// Owns authentication state per seller account.
///
/// The token store is injected at construction and is the single source of
/// truth; no other component constructs or mutates [`Session`] values.
/// Concurrent refreshes for one seller are last-write-wins on the store.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Exchange API credentials for a session.
    ///
    /// Idempotent while a valid session exists: no remote call is made and
    /// the stored session is returned as-is. On remote rejection the stored
    /// state is left untouched.
    pub async fn authenticate(
        &self,
        seller_id: &str,
        api_key: &str,
        api_secret: &str,
    ) -> ClientResult<Session> {
        if let Ok(Some(existing)) = self.store.get(seller_id).await {
            if existing.is_valid(Utc::now()) {
                debug!(seller_id, "reusing valid session");
                return Ok(existing);
            }
        }

        let resp = self
            .http
            .post(format!("{}/auth/token", self.base_url))
            .json(&json!({
                "seller_id": seller_id,
                "api_key": api_key,
                "api_secret": api_secret,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Auth(remote_detail(&body, &format!("HTTP {status}"))));
        }

        let token: TokenResponse = resp.json().await?;
        let session = Session {
            access_token: Some(token.access_token),
            refresh_token: token.refresh_token,
            expires_at: Some(Utc::now() + Duration::seconds(token.expires_in)),
            seller_id: seller_id.to_string(),
        };
        self.store.put(seller_id, &session).await?;
        info!(seller_id, "authenticated");
        Ok(session)
    }

    /// True iff the seller holds a usable access token, refreshing a stale
    /// one inline when a refresh token is available.
    pub async fn is_authenticated(&self, seller_id: &str) -> bool {
        let session = match self.store.get(seller_id).await {
            Ok(Some(s)) => s,
            Ok(None) => return false,
            Err(e) => {
                warn!(seller_id, error = %e, "session lookup failed");
                return false;
            }
        };

        if session.is_valid(Utc::now()) {
            return true;
        }
        self.refresh(seller_id, session).await
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// On success all three credential fields are replaced in one write,
    /// keeping the previous refresh token when the server omits a new one.
    /// On failure the session is revoked. No refresh token means no network
    /// call.
    async fn refresh(&self, seller_id: &str, session: Session) -> bool {
        let Some(refresh_token) = session.refresh_token.clone().filter(|t| !t.is_empty()) else {
            debug!(seller_id, "no refresh token, cannot refresh");
            return false;
        };

        let result = self
            .http
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await;

        let token: TokenResponse = match result {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(t) => t,
                Err(e) => {
                    warn!(seller_id, error = %e, "refresh response unreadable, revoking session");
                    self.revoke(seller_id).await;
                    return false;
                }
            },
            Ok(resp) => {
                warn!(seller_id, status = %resp.status(), "refresh rejected, revoking session");
                self.revoke(seller_id).await;
                return false;
            }
            Err(e) => {
                warn!(seller_id, error = %e, "refresh transport failure, revoking session");
                self.revoke(seller_id).await;
                return false;
            }
        };

        let renewed = Session {
            access_token: Some(token.access_token),
            refresh_token: token.refresh_token.or(Some(refresh_token)),
            expires_at: Some(Utc::now() + Duration::seconds(token.expires_in)),
            seller_id: seller_id.to_string(),
        };
        if let Err(e) = self.store.put(seller_id, &renewed).await {
            warn!(seller_id, error = %e, "failed to persist refreshed session");
            return false;
        }
        info!(seller_id, "session refreshed");
        true
    }

    /// Delete the session unconditionally. Storage failures are logged, not
    /// propagated: revocation always appears to succeed.
    pub async fn revoke(&self, seller_id: &str) {
        match self.store.delete(seller_id).await {
            Ok(existed) => debug!(seller_id, existed, "session revoked"),
            Err(e) => warn!(seller_id, error = %e, "session delete failed during revoke"),
        }
    }

    /// The token to attach to an outbound request. Performs no refresh;
    /// callers check `is_authenticated` first or accept staleness risk.
    pub async fn access_token(&self, seller_id: &str) -> ClientResult<String> {
        let session = self
            .store
            .get(seller_id)
            .await?
            .ok_or(ClientError::NotAuthenticated)?;
        session
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::NotAuthenticated)
    }
}

/// Pull a human-readable detail out of a remote error body.
pub(crate) fn remote_detail(body: &str, fallback: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(msg) = v.get(key).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use sellerlink_store::MemoryTokenStore;

    fn manager(base_url: String) -> (SessionManager, Arc<MemoryTokenStore>) {
        let memory = Arc::new(MemoryTokenStore::new());
        let store: Arc<dyn TokenStore> = memory.clone();
        (SessionManager::new(store, base_url), memory)
    }

    fn token_body(access: &str, refresh: Option<&str>, expires_in: i64) -> serde_json::Value {
        let mut body = json!({ "access_token": access, "expires_in": expires_in });
        if let Some(r) = refresh {
            body["refresh_token"] = json!(r);
        }
        body
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn authenticate_persists_session() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/auth/token").json_body_partial(r#"{"seller_id": "S1"}"#);
            then.status(200).json_body(token_body("T1", Some("R1"), 3600));
        });

        let (mgr, memory) = manager(server.base_url());
        let session = mgr.authenticate("S1", "k", "s").await.unwrap();
        assert_eq!(session.access_token.as_deref(), Some("T1"));
        assert_eq!(session.seller_id, "S1");

        let stored = memory.get("S1").await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
        mock.assert();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn authenticate_is_idempotent_while_valid() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(200).json_body(token_body("T1", Some("R1"), 3600));
        });

        let (mgr, _) = manager(server.base_url());
        let first = mgr.authenticate("S1", "k", "s").await.unwrap();
        let second = mgr.authenticate("S1", "k", "s").await.unwrap();
        assert_eq!(first.seller_id, second.seller_id);
        assert_eq!(mock.hits(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn authenticate_failure_leaves_no_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(401).json_body(json!({"message": "invalid api key"}));
        });

        let (mgr, memory) = manager(server.base_url());
        let err = mgr.authenticate("S1", "bad", "creds").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(ref m) if m == "invalid api key"));
        assert!(memory.get("S1").await.unwrap().is_none());
        assert!(!mgr.is_authenticated("S1").await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn never_authenticated_account_has_no_token() {
        let (mgr, _) = manager("http://127.0.0.1:1".to_string());
        assert!(!mgr.is_authenticated("ghost").await);
        assert!(matches!(
            mgr.access_token("ghost").await.unwrap_err(),
            ClientError::NotAuthenticated
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stale_session_refreshes_transparently() {
        let server = MockServer::start();
        let refresh = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/refresh")
                .json_body(json!({"refresh_token": "R1"}));
            then.status(200).json_body(token_body("T2", Some("R2"), 3600));
        });

        let (mgr, memory) = manager(server.base_url());
        memory
            .put(
                "S1",
                &Session {
                    access_token: Some("T1".to_string()),
                    refresh_token: Some("R1".to_string()),
                    expires_at: Some(Utc::now() - Duration::seconds(10)),
                    seller_id: "S1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(mgr.is_authenticated("S1").await);
        assert_eq!(mgr.access_token("S1").await.unwrap(), "T2");
        let stored = memory.get("S1").await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("R2"));
        refresh.assert();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_keeps_old_refresh_token_when_server_omits_one() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(200).json_body(token_body("T2", None, 3600));
        });

        let (mgr, memory) = manager(server.base_url());
        memory
            .put(
                "S1",
                &Session {
                    access_token: Some("T1".to_string()),
                    refresh_token: Some("R1".to_string()),
                    expires_at: Some(Utc::now() - Duration::seconds(10)),
                    seller_id: "S1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(mgr.is_authenticated("S1").await);
        let stored = memory.get("S1").await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_refresh_revokes_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(401).json_body(json!({"message": "refresh token revoked"}));
        });

        let (mgr, memory) = manager(server.base_url());
        memory
            .put(
                "S1",
                &Session {
                    access_token: Some("T1".to_string()),
                    refresh_token: Some("R1".to_string()),
                    expires_at: Some(Utc::now() - Duration::seconds(10)),
                    seller_id: "S1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(!mgr.is_authenticated("S1").await);
        assert!(memory.get("S1").await.unwrap().is_none());
        assert!(!mgr.is_authenticated("S1").await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stale_session_without_refresh_token_makes_no_network_call() {
        let (mgr, memory) = manager("http://127.0.0.1:1".to_string());
        memory
            .put(
                "S1",
                &Session {
                    access_token: Some("T1".to_string()),
                    refresh_token: None,
                    expires_at: Some(Utc::now() - Duration::seconds(10)),
                    seller_id: "S1".to_string(),
                },
            )
            .await
            .unwrap();

        // An unreachable base URL would surface as a transport failure if a
        // call were attempted; the refusal must be local.
        assert!(!mgr.is_authenticated("S1").await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn revoke_is_idempotent() {
        let (mgr, _) = manager("http://127.0.0.1:1".to_string());
        mgr.revoke("never-seen").await;
        mgr.revoke("never-seen").await;
        assert!(!mgr.is_authenticated("never-seen").await);
    }

    #[test]
    fn remote_detail_prefers_structured_message() {
        assert_eq!(remote_detail(r#"{"message":"nope"}"#, "HTTP 400"), "nope");
        assert_eq!(remote_detail(r#"{"error":"bad"}"#, "HTTP 400"), "bad");
        assert_eq!(remote_detail("plain text", "HTTP 400"), "plain text");
        assert_eq!(remote_detail("", "HTTP 400"), "HTTP 400");
    }
}
