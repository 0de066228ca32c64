//! Short link entity and expiration policy.

use std::time::Duration;

/// Lifetime applied when the caller does not pick one.
pub const DEFAULT_EXPIRATION_DAYS: u32 = 365;

/// Upper bound for a caller-chosen lifetime (ten years).
pub const MAX_EXPIRATION_DAYS: u32 = 365 * 10;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// How long a short link stays resolvable.
///
/// Expiry is enforced by the link store through a key TTL; once it elapses the
/// code is gone and may be reserved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// [`DEFAULT_EXPIRATION_DAYS`] from creation.
    Default,
    /// A caller-chosen number of days in `1..=MAX_EXPIRATION_DAYS`.
    Days(u32),
    /// No TTL at all.
    Never,
}

impl Expiration {
    /// Resolves a caller-supplied day count.
    ///
    /// `0` means never expire, `1..=MAX_EXPIRATION_DAYS` is taken as is, anything
    /// else is rejected with `None`.
    pub fn from_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(Self::Never),
            d if d >= 1 && d <= i64::from(MAX_EXPIRATION_DAYS) => Some(Self::Days(d as u32)),
            _ => None,
        }
    }

    /// Store TTL for this policy, `None` when the link never expires.
    pub fn ttl(&self) -> Option<Duration> {
        match self {
            Self::Default => Some(days_to_duration(DEFAULT_EXPIRATION_DAYS)),
            Self::Days(days) => Some(days_to_duration(*days)),
            Self::Never => None,
        }
    }
}

fn days_to_duration(days: u32) -> Duration {
    Duration::from_secs(u64::from(days) * SECONDS_PER_DAY)
}

/// A reserved short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    pub expiration: Expiration,
}

impl ShortLink {
    pub fn new(code: String, target: String, expiration: Expiration) -> Self {
        Self {
            code,
            target,
            expiration,
        }
    }
}
