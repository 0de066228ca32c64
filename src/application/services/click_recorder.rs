//! Non-blocking hand-off of click events to the background worker.

use metrics::counter;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{error, warn};

use crate::domain::click_event::ClickEvent;

/// Enqueues click events for [`crate::domain::click_worker::run_click_worker`].
///
/// Recording never waits and never fails from the caller's point of view: a
/// full or closed queue drops the event and logs it. Redirect availability
/// outranks analytics completeness.
#[derive(Clone)]
pub struct ClickRecorder {
    sender: mpsc::Sender<ClickEvent>,
}

impl ClickRecorder {
    pub fn new(sender: mpsc::Sender<ClickEvent>) -> Self {
        Self { sender }
    }

    /// Queues one click for `code`.
    pub fn record(&self, code: &str, user_agent: Option<&str>, referrer: Option<&str>) {
        let event = ClickEvent::new(code.to_string(), user_agent, referrer);

        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "Click queue full, dropping click event");
                counter!("riid_clicks_dropped_total").increment(1);
            }
            Err(TrySendError::Closed(event)) => {
                error!(code = %event.code, "Click queue closed, dropping click event");
                counter!("riid_clicks_dropped_total").increment(1);
            }
        }
    }

    /// Returns true once the worker side of the queue has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots currently left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}
