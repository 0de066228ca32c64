//! Redis-backed link store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::LinkStore;
use crate::error::StoreError;

/// Link store on a shared Redis instance.
///
/// Each code is one string key holding the target URL; expiry is the key TTL.
/// The connection manager multiplexes one connection across tasks and
/// reconnects on its own, so the store is cheap to share behind an `Arc`.
/// Every command is bounded by `op_timeout`.
pub struct RedisLinkStore {
    conn: ConnectionManager,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `key_prefix` - Namespace prepended to every code (may be empty)
    /// - `op_timeout` - Deadline applied to each command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid or the server
    /// cannot be reached, [`StoreError::Timeout`] if the PING does not answer
    /// in time.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
        op_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = match tokio::time::timeout(op_timeout, ConnectionManager::new(client)).await
        {
            Ok(Ok(manager)) => manager,
            Ok(Err(e)) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to connect to Redis: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(StoreError::Timeout {
                    operation: "connect",
                    after: op_timeout,
                });
            }
        };

        let store = Self {
            conn: manager,
            key_prefix: key_prefix.into(),
            op_timeout,
        };

        let mut conn = store.conn.clone();
        store.bounded("ping", conn.ping::<()>()).await?;

        info!("Connected to Redis");

        Ok(store)
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout {
                operation,
                after: self.op_timeout,
            }),
        }
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        self.bounded("exists", conn.exists::<_, bool>(&key)).await
    }

    async fn reserve(
        &self,
        code: &str,
        target: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(target).arg("NX");
        if let Some(ttl) = ttl.filter(|d| !d.is_zero()) {
            cmd.arg("PX").arg(ttl.as_millis() as u64);
        }

        // SET ... NX replies nil when the key already exists.
        let reply: Option<String> = self
            .bounded("reserve", cmd.query_async(&mut conn))
            .await?;

        let won = reply.is_some();
        debug!(code, won, ?ttl, "Redis SET NX");
        Ok(won)
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        self.bounded("get", conn.get::<_, Option<String>>(&key))
            .await
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        self.bounded("ping", conn.ping::<()>()).await.is_ok()
    }
}
