//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// A click captured on the redirect path, waiting to be appended to the log.
///
/// Carries no timestamp: the worker stamps each click as it writes it, so log
/// time follows insertion order. Empty header values are stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClickEvent {
    pub fn new(code: String, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            code,
            user_agent: non_empty(user_agent),
            referrer: non_empty(referrer),
        }
    }

    /// Turns the event into a row to insert, recorded at `timestamp`.
    pub fn into_new_click(self, timestamp: DateTime<Utc>) -> NewClick {
        NewClick {
            short_code: self.code,
            timestamp,
            user_agent: self.user_agent,
            referrer: self.referrer,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            "abc123".to_string(),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(event.code, "abc123");
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.referrer.as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new("xyz".to_string(), None, None);

        assert!(event.user_agent.is_none());
        assert!(event.referrer.is_none());
    }

    #[test]
    fn test_empty_headers_become_absent() {
        let event = ClickEvent::new("xyz".to_string(), Some(""), Some(""));

        assert!(event.user_agent.is_none());
        assert!(event.referrer.is_none());
    }

    #[test]
    fn test_into_new_click_uses_given_timestamp() {
        let event = ClickEvent::new("abc".to_string(), Some("Safari"), None);
        let stamp = Utc::now();

        let new_click = event.into_new_click(stamp);

        assert_eq!(new_click.short_code, "abc");
        assert_eq!(new_click.timestamp, stamp);
        assert_eq!(new_click.user_agent.as_deref(), Some("Safari"));
        assert!(new_click.referrer.is_none());
    }
}
