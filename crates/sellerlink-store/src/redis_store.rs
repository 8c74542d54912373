//! Redis-backed durable token store.
//!
//! Records live under `tokens:<sellerId>` as flat JSON (camelCase keys,
//! epoch-millisecond expiry) and carry a multi-day TTL as a cleanup
//! safeguard, independent of the token's own expiry.

use async_trait::async_trait;
use redis::AsyncCommands;
use sellerlink_core::{CoreError, CoreResult, Session, TokenStore};
use std::time::Duration;
use tracing::debug;

const KEY_PREFIX: &str = "tokens:";
/// Retention window for durable records; not a correctness mechanism.
const RETENTION_SECS: u64 = 7 * 24 * 60 * 60;
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 50;

#[derive(Clone)]
pub struct RedisTokenStore {
    client: redis::Client,
}

impl RedisTokenStore {
    pub fn open(url: &str) -> CoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CoreError::storage(format!("invalid redis url: {e}")))?;
        Ok(Self { client })
    }

    fn key(seller_id: &str) -> String {
        format!("{KEY_PREFIX}{seller_id}")
    }

    async fn connection(&self) -> CoreResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CoreError::storage(format!("redis connect: {e}")))
    }

    /// Run `op` with bounded retry and exponential backoff.
    async fn with_retry<T, F, Fut>(&self, what: &str, mut op: F) -> CoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, redis::RedisError>>,
    {
        let mut last_err = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(BASE_BACKOFF_MS << (attempt - 1));
                debug!(what, attempt, ?delay, "retrying redis operation");
                tokio::time::sleep(delay).await;
            }
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => last_err = Some(e),
            }
        }
        Err(CoreError::storage(format!(
            "redis {what} failed after {MAX_ATTEMPTS} attempts: {}",
            last_err.map(|e| e.to_string()).unwrap_or_default()
        )))
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn put(&self, seller_id: &str, session: &Session) -> CoreResult<()> {
        let key = Self::key(seller_id);
        let payload = serde_json::to_string(session)?;
        self.with_retry("put", || {
            let key = key.clone();
            let payload = payload.clone();
            async move {
                let mut con = self.client.get_multiplexed_async_connection().await?;
                con.set_ex(key, payload, RETENTION_SECS as u64).await
            }
        })
        .await
    }

    async fn get(&self, seller_id: &str) -> CoreResult<Option<Session>> {
        let key = Self::key(seller_id);
        let raw: Option<String> = self
            .with_retry("get", || {
                let key = key.clone();
                async move {
                    let mut con = self.client.get_multiplexed_async_connection().await?;
                    con.get(key).await
                }
            })
            .await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, seller_id: &str) -> CoreResult<bool> {
        let key = Self::key(seller_id);
        let removed: i64 = self
            .with_retry("delete", || {
                let key = key.clone();
                async move {
                    let mut con = self.client.get_multiplexed_async_connection().await?;
                    con.del(key).await
                }
            })
            .await?;
        Ok(removed > 0)
    }

    async fn ready(&self) -> bool {
        match self.connection().await {
            Ok(mut con) => redis::cmd("PING")
                .query_async::<_, String>(&mut con)
                .await
                .is_ok(),
            Err(_) => false,
        }
    }
}
