//! Helper functions shared across layers.
//!
//! - [`url_normalizer`] - Target URL normalization

pub mod url_normalizer;
