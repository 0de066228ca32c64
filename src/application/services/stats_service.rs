//! Click statistics service.

use std::sync::Arc;

use crate::domain::entities::Click;
use crate::domain::repositories::ClickLog;
use crate::error::{AppError, store_failure};

/// Click history for one short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub short_code: String,
    pub total_clicks: usize,
    /// Most recent first.
    pub clicks: Vec<Click>,
}

/// Read side of click tracking.
///
/// Statistics come straight from the click log and are independent of the
/// link store: an expired or never-created code simply reports zero clicks.
pub struct StatsService {
    click_log: Arc<dyn ClickLog>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(click_log: Arc<dyn ClickLog>) -> Self {
        Self { click_log }
    }

    /// Returns every recorded click for `code`.
    ///
    /// Clicks still waiting in the queue are not visible yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on click log failure.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        let clicks = self
            .click_log
            .list_by_code(code)
            .await
            .map_err(|e| store_failure("list_clicks", code, e))?;

        Ok(LinkStats {
            short_code: code.to_string(),
            total_clicks: clicks.len(),
            clicks,
        })
    }

    /// Checks click log connectivity.
    pub async fn health_check(&self) -> bool {
        self.click_log.health_check().await
    }
}
