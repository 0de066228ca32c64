//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a short code was resolved.
///
/// Rows are append-only and are kept even after the link itself has expired.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        short_code: String,
        timestamp: DateTime<Utc>,
        user_agent: Option<String>,
        referrer: Option<String>,
    ) -> Self {
        Self {
            id,
            short_code,
            timestamp,
            user_agent,
            referrer,
        }
    }
}

/// Input data for appending a click to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_creation_with_all_fields() {
        let now = Utc::now();
        let click = Click::new(
            1,
            "abc".to_string(),
            now,
            Some("Mozilla/5.0".to_string()),
            Some("https://google.com".to_string()),
        );

        assert_eq!(click.id, 1);
        assert_eq!(click.short_code, "abc");
        assert_eq!(click.timestamp, now);
        assert_eq!(click.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(click.referrer.as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_click_creation_minimal() {
        let click = Click::new(7, "xyz".to_string(), Utc::now(), None, None);

        assert!(click.user_agent.is_none());
        assert!(click.referrer.is_none());
    }
}
