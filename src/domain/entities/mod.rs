//! Core domain entities.
//!
//! - [`ShortLink`] - A code to target mapping with its [`Expiration`]
//! - [`Click`] - A recorded click on a short code, with [`NewClick`] as its insert form

pub mod click;
pub mod short_link;

pub use click::{Click, NewClick};
pub use short_link::{DEFAULT_EXPIRATION_DAYS, Expiration, MAX_EXPIRATION_DAYS, ShortLink};
