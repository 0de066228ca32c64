//! Authorization check for custom handles.

use std::collections::HashSet;

/// Checks presented authorization codes against the allow-list loaded at startup.
///
/// Matching is exact: no trimming, no case folding. The list is immutable for
/// the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct AuthValidator {
    codes: HashSet<String>,
}

impl AuthValidator {
    /// Builds a validator from the configured codes; empty entries are ignored.
    pub fn new(codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            codes: codes.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    /// Returns true iff `code` is non-empty and on the allow-list.
    pub fn validate(&self, code: &str) -> bool {
        !code.is_empty() && self.codes.contains(code)
    }

    /// Returns whether any code is configured at all.
    pub fn is_enabled(&self) -> bool {
        !self.codes.is_empty()
    }
}
