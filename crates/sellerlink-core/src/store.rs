//! Token store abstraction.

use crate::{CoreResult, Session};
use async_trait::async_trait;

/// Per-seller session storage.
///
/// The store is the single source of truth for session state; the session
/// manager is its only writer. Implementations live in `sellerlink-store`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store or replace the session for a seller.
    async fn put(&self, seller_id: &str, session: &Session) -> CoreResult<()>;

    /// Fetch the session for a seller, if any.
    async fn get(&self, seller_id: &str) -> CoreResult<Option<Session>>;

    /// Remove the session for a seller; returns whether one existed.
    async fn delete(&self, seller_id: &str) -> CoreResult<bool>;

    /// Backend reachability, used by the readiness probe. In-memory stores
    /// are always ready; durable backends ping.
    async fn ready(&self) -> bool {
        true
    }
}
