//! REST auxiliary surface.

pub mod handlers;
pub mod router;

use crate::{AppState, ServerError, ServerResult};
use tracing::info;

pub async fn serve(state: AppState, addr: &str) -> ServerResult<()> {
    let app = router::create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("failed to bind {addr}: {e}")))?;
    info!(addr, "REST server listening");
    axum::serve(listener, app).await.map_err(ServerError::Io)?;
    Ok(())
}
