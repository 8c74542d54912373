//! Durable-first store with an in-process authority.
//!
//! Every operation is attempted against the durable backend (which does its
//! own bounded retry); on failure the in-memory map serves as the sole
//! authority for that operation and the degradation is logged, never
//! surfaced. Writes always land in the memory mirror first so a durable
//! outage loses durability, not correctness.

use crate::MemoryTokenStore;
use async_trait::async_trait;
use sellerlink_core::{CoreResult, Session, TokenStore};
use tracing::warn;

pub struct FallbackTokenStore<P> {
    primary: P,
    memory: MemoryTokenStore,
}

impl<P: TokenStore> FallbackTokenStore<P> {
    pub fn new(primary: P) -> Self {
        Self { primary, memory: MemoryTokenStore::new() }
    }
}

#[async_trait]
impl<P: TokenStore> TokenStore for FallbackTokenStore<P> {
    async fn put(&self, seller_id: &str, session: &Session) -> CoreResult<()> {
        self.memory.put(seller_id, session).await?;
        if let Err(e) = self.primary.put(seller_id, session).await {
            warn!(seller_id, error = %e, "durable token write failed, memory copy is authoritative");
        }
        Ok(())
    }

    async fn get(&self, seller_id: &str) -> CoreResult<Option<Session>> {
        match self.primary.get(seller_id).await {
            Ok(Some(session)) => {
                // Keep the mirror aligned for the next outage.
                self.memory.put(seller_id, &session).await?;
                Ok(Some(session))
            }
            Ok(None) => {
                // The durable side may have missed a write made while it was
                // down; the memory copy wins and is replayed outward.
                match self.memory.get(seller_id).await? {
                    Some(session) => {
                        if let Err(e) = self.primary.put(seller_id, &session).await {
                            warn!(seller_id, error = %e, "durable token replay failed");
                        }
                        Ok(Some(session))
                    }
                    None => Ok(None),
                }
            }
            Err(e) => {
                warn!(seller_id, error = %e, "durable token read failed, serving memory copy");
                self.memory.get(seller_id).await
            }
        }
    }

    async fn delete(&self, seller_id: &str) -> CoreResult<bool> {
        let existed = self.memory.delete(seller_id).await?;
        match self.primary.delete(seller_id).await {
            Ok(durable_existed) => Ok(existed || durable_existed),
            Err(e) => {
                warn!(seller_id, error = %e, "durable token delete failed");
                Ok(existed)
            }
        }
    }

    async fn ready(&self) -> bool {
        self.primary.ready().await
    }
}
