//! DTOs for per-code click statistics.

use serde::Serialize;

use super::clicks::ClickInfo;
use crate::application::services::LinkStats;

/// Click history for a short code, most recent first.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.short_code,
            total_clicks: stats.total_clicks,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
