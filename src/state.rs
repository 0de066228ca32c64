//! Shared application state for request handlers.

use std::sync::Arc;

use crate::application::services::{AuthValidator, ClickRecorder, LinkService, StatsService};

/// State injected into every handler.
///
/// Cheap to clone: services sit behind `Arc` and the recorder is a channel
/// sender.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub auth_validator: Arc<AuthValidator>,
    pub click_recorder: ClickRecorder,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        stats_service: Arc<StatsService>,
        auth_validator: Arc<AuthValidator>,
        click_recorder: ClickRecorder,
    ) -> Self {
        Self {
            link_service,
            stats_service,
            auth_validator,
            click_recorder,
        }
    }
}
