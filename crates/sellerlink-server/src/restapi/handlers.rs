//! REST handlers: probes plus the login/logout aliases over the session
//! manager.

use crate::dto::{LoginRequest, LogoutRequest, ResponseEnvelope};
use crate::middleware::RequestId;
use crate::AppState;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use sellerlink_client::ClientError;
use serde_json::{json, Value};

type Reply = (StatusCode, Json<ResponseEnvelope<Value>>);

/// GET /health - liveness.
pub async fn health(Extension(request_id): Extension<RequestId>) -> Reply {
    let data = json!({
        "status": "healthy",
        "service": "sellerlink",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(ResponseEnvelope::ok(request_id.0, data)))
}

/// GET /ready - readiness, reflecting durable-cache reachability when one is
/// configured.
pub async fn ready(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Reply {
    if state.sessions.store().ready().await {
        (StatusCode::OK, Json(ResponseEnvelope::ok(request_id.0, json!({ "status": "ready" }))))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ResponseEnvelope::failed(
                request_id.0,
                json!({ "status": "degraded", "token_store": "unreachable" }),
            )),
        )
    }
}

/// POST /auth/login - thin alias over `authenticate`.
pub async fn login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<LoginRequest>,
) -> Reply {
    match state
        .sessions
        .authenticate(&body.seller_id, &body.api_key, &body.api_secret)
        .await
    {
        Ok(session) => (
            StatusCode::OK,
            Json(ResponseEnvelope::ok(
                request_id.0,
                json!({ "seller_id": session.seller_id, "authenticated": true }),
            )),
        ),
        Err(ClientError::Auth(message)) => (
            StatusCode::UNAUTHORIZED,
            Json(ResponseEnvelope::failed(request_id.0, json!({ "message": message }))),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ResponseEnvelope::failed(request_id.0, json!({ "message": e.to_string() }))),
        ),
    }
}

/// POST /auth/logout - thin alias over `revoke`; always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<LogoutRequest>,
) -> Reply {
    state.sessions.revoke(&body.seller_id).await;
    (
        StatusCode::OK,
        Json(ResponseEnvelope::ok(
            request_id.0,
            json!({ "seller_id": body.seller_id, "authenticated": false }),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use sellerlink_client::SessionManager;
    use sellerlink_store::MemoryTokenStore;
    use std::sync::Arc;

    fn state(base_url: String) -> AppState {
        let store = Arc::new(MemoryTokenStore::new());
        AppState::new(Arc::new(SessionManager::new(store, base_url)))
    }

    fn rid() -> Extension<RequestId> {
        Extension(RequestId("test-req".to_string()))
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (status, Json(body)) = health(rid()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.data["status"], "healthy");
        assert_eq!(body.metadata.request_id, "test-req");
    }

    #[tokio::test]
    async fn ready_is_ok_with_memory_store() {
        let (status, Json(body)) =
            ready(State(state("http://127.0.0.1:1".to_string())), rid()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_logout_roundtrip() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "T1", "refresh_token": "R1", "expires_in": 3600
            }));
        });

        let state = state(server.base_url());
        let (status, Json(body)) = login(
            State(state.clone()),
            rid(),
            Json(LoginRequest {
                seller_id: "S1".to_string(),
                api_key: "k".to_string(),
                api_secret: "s".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data["authenticated"], true);
        assert!(state.sessions.is_authenticated("S1").await);

        let (status, Json(body)) = logout(
            State(state.clone()),
            rid(),
            Json(LogoutRequest { seller_id: "S1".to_string() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data["authenticated"], false);
        assert!(!state.sessions.is_authenticated("S1").await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_maps_rejection_to_401() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(401).json_body(serde_json::json!({ "message": "invalid api key" }));
        });

        let (status, Json(body)) = login(
            State(state(server.base_url())),
            rid(),
            Json(LoginRequest {
                seller_id: "S1".to_string(),
                api_key: "bad".to_string(),
                api_secret: "s".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.success);
        assert_eq!(body.data["message"], "invalid api key");
    }
}
