//! Background worker that drains the click queue into the click log.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickLog;

/// Retries after the first failed append.
const MAX_RETRIES: usize = 3;

/// Appends queued click events until every sender has been dropped.
///
/// Events are written one at a time in arrival order, so rows for a code are
/// inserted in the order the redirects were served. Each click is stamped just
/// before its first append attempt, and stamps never go backwards, so ordering
/// the log by timestamp agrees with insertion order. A failed append is retried
/// with jittered exponential backoff; once retries run out the click is logged
/// and dropped. The redirect that produced it has long since been answered.
///
/// Returns only after the channel is closed and fully drained, which makes the
/// task handle usable as a shutdown barrier.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, click_log: Arc<dyn ClickLog>) {
    info!("Click worker started");

    let mut last_stamp = None;

    while let Some(event) = rx.recv().await {
        let code = event.code.clone();
        let stamp = next_stamp(last_stamp, Utc::now());
        last_stamp = Some(stamp);
        let new_click = event.into_new_click(stamp);

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_millis(500))
            .map(jitter)
            .take(MAX_RETRIES);

        let result = Retry::spawn(strategy, || click_log.append(new_click.clone())).await;

        match result {
            Ok(click) => {
                debug!(code = %code, id = click.id, "Click event recorded");
                counter!("riid_clicks_recorded_total").increment(1);
            }
            Err(e) => {
                error!(code = %code, error = %e, "Failed to record click event");
                counter!("riid_clicks_failed_total").increment(1);
            }
        }
    }

    info!("Click queue closed, worker drained");
}

/// Wall-clock time, held at the previous stamp if the clock stepped back.
fn next_stamp(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    last.map_or(now, |last| last.max(now))
}
