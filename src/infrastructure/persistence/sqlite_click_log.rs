//! SQLite implementation of the click log.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickLog;
use crate::error::StoreError;

/// Click history stored in the SQLite table `clicks`.
///
/// Rows are only ever inserted. Queries are bounded by `op_timeout`, which
/// also caps how long a caller waits for a pooled connection.
pub struct SqliteClickLog {
    pool: Arc<SqlitePool>,
    op_timeout: Duration,
}

impl SqliteClickLog {
    /// Opens (creating if needed) the click database and applies migrations.
    ///
    /// `database_url` accepts any SQLite URL, e.g. `sqlite://./riidme_stats.db`
    /// or `sqlite::memory:`. An in-memory database lives per connection, so it
    /// must be opened with `max_connections = 1`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        op_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(op_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to migrate click log: {}", e)))?;

        info!("Click log ready");

        Ok(Self {
            pool: Arc::new(pool),
            op_timeout,
        })
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
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
impl ClickLog for SqliteClickLog {
    async fn append(&self, new_click: NewClick) -> Result<Click, StoreError> {
        let query = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO clicks (short_code, timestamp, user_agent, referrer)
            VALUES (?, ?, ?, ?)
            RETURNING id, short_code, timestamp, user_agent, referrer
            "#,
        )
        .bind(&new_click.short_code)
        .bind(new_click.timestamp)
        .bind(&new_click.user_agent)
        .bind(&new_click.referrer)
        .fetch_one(self.pool.as_ref());

        self.bounded("append", query).await
    }

    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, StoreError> {
        let query = sqlx::query_as::<_, Click>(
            r#"
            SELECT id, short_code, timestamp, user_agent, referrer
            FROM clicks
            WHERE short_code = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(code)
        .fetch_all(self.pool.as_ref());

        self.bounded("list_by_code", query).await
    }

    async fn health_check(&self) -> bool {
        let query = sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(self.pool.as_ref());
        self.bounded("ping", query).await.is_ok()
    }
}
