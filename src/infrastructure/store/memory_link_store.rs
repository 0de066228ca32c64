//! In-process link store.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::repositories::LinkStore;
use crate::error::StoreError;

struct Entry {
    target: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// A [`LinkStore`] kept in process memory.
///
/// Honours the same contract as Redis: reservation is atomic (the check and
/// the insert happen under one lock) and expired entries are invisible. Every
/// reservation also sweeps expired entries, so the map stays bounded by the
/// number of live links. Data
/// does not survive a restart, so this backend is meant for local development
/// and tests. Uses the tokio clock, which lets tests pause and advance time.
#[derive(Default)]
pub struct MemoryLinkStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        Ok(self.lock()?.get(code).is_some_and(|e| e.is_live(now)))
    }

    async fn reserve(
        &self,
        code: &str,
        target: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let now = Instant::now();
        let fresh = Entry {
            target: target.to_string(),
            expires_at: ttl.filter(|d| !d.is_zero()).map(|d| now + d),
        };

        let mut entries = self.lock()?;
        entries.retain(|_, e| e.is_live(now));

        match entries.entry(code.to_string()) {
            MapEntry::Occupied(mut slot) => {
                if slot.get().is_live(now) {
                    return Ok(false);
                }
                slot.insert(fresh);
            }
            MapEntry::Vacant(slot) => {
                slot.insert(fresh);
            }
        }

        Ok(true)
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;

        if let Some(entry) = entries.get(code) {
            if entry.is_live(now) {
                return Ok(Some(entry.target.clone()));
            }
            entries.remove(code);
        }

        Ok(None)
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }
}
