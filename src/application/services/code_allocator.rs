//! Short code generation and custom handle validation.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::error::AppError;

/// URL-safe alphabet for generated codes.
const ALPHABET: &[u8; 64] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

pub const DEFAULT_CODE_LENGTH: usize = 9;
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 32;

pub const MIN_HANDLE_LENGTH: usize = 3;
pub const MAX_HANDLE_LENGTH: usize = 30;

/// Handles that would be shadowed by fixed routes.
const RESERVED_HANDLES: &[&str] = &["api", "health", "shorten", "validate-auth"];

/// Failure to produce a random code.
///
/// Callers treat this as a transient internal error.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("code length {0} is outside {min}..={max}", min = MIN_CODE_LENGTH, max = MAX_CODE_LENGTH)]
    InvalidLength(usize),

    #[error("code generator state is unusable")]
    Poisoned,
}

/// Produces random codes and checks custom handles.
///
/// Codes are identifiers, not secrets: the generator is a seedable PRNG and a
/// fixed seed is acceptable. Collisions are resolved by the link store's
/// atomic reservation, not here.
pub struct CodeAllocator {
    rng: Mutex<StdRng>,
    length: usize,
}

impl CodeAllocator {
    /// Creates an allocator seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            length,
        }
    }

    /// Creates an allocator with a fixed seed; the code sequence is reproducible.
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            length,
        }
    }

    /// Generates a random code of the configured length.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidLength`] if the allocator was built
    /// with a length outside the supported range, and
    /// [`GenerationError::Poisoned`] if the generator state is unusable.
    pub fn generate_random(&self) -> Result<String, GenerationError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.length) {
            return Err(GenerationError::InvalidLength(self.length));
        }

        let mut rng = self.rng.lock().map_err(|_| GenerationError::Poisoned)?;

        Ok((0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect())
    }

    /// Validates a user-provided custom handle.
    ///
    /// # Rules
    ///
    /// - Length: 3-30 characters
    /// - Cannot be a reserved route name
    ///
    /// The character set is not restricted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a rule is violated.
    pub fn validate_custom_handle(&self, handle: &str) -> Result<(), AppError> {
        let length = handle.chars().count();
        if !(MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&length) {
            return Err(AppError::bad_request(
                format!(
                    "Custom handle must be between {} and {} characters.",
                    MIN_HANDLE_LENGTH, MAX_HANDLE_LENGTH
                ),
                json!({ "provided_length": length }),
            ));
        }

        if RESERVED_HANDLES.contains(&handle) {
            return Err(AppError::bad_request(
                "This handle is reserved.",
                json!({ "custom_handle": handle }),
            ));
        }

        Ok(())
    }
}
