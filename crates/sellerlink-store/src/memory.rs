//! In-memory token store.

use async_trait::async_trait;
use sellerlink_core::{CoreResult, Session, TokenStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local session map; the default backend and the fallback authority
/// when the durable cache is down.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    data: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions, for diagnostics.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn put(&self, seller_id: &str, session: &Session) -> CoreResult<()> {
        let mut data = self.data.write().await;
        data.insert(seller_id.to_string(), session.clone());
        Ok(())
    }

    async fn get(&self, seller_id: &str) -> CoreResult<Option<Session>> {
        let data = self.data.read().await;
        Ok(data.get(seller_id).cloned())
    }

    async fn delete(&self, seller_id: &str) -> CoreResult<bool> {
        let mut data = self.data.write().await;
        Ok(data.remove(seller_id).is_some())
    }
}
