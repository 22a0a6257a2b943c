//! One-shot handoff of upload results into the results view.
//!
//! A successful upload search stores its results here under a random token
//! and redirects to `/results?seed=<token>`. The results handler consumes
//! the entry with [`SeedStore::take`], which removes it, so a reload or
//! back-navigation of the same URL finds nothing and falls back to the
//! URL-driven keyword/idle state. Abandoned entries expire.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::viewstate::UploadSeed;

const SEED_TTL_SECS: i64 = 600;

struct StoredSeed {
    seed: UploadSeed,
    stored_at: DateTime<Utc>,
}

pub struct SeedStore {
    inner: Mutex<HashMap<Uuid, StoredSeed>>,
    ttl_secs: i64,
}

impl SeedStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl_secs: SEED_TTL_SECS,
        }
    }

    #[cfg(test)]
    fn with_ttl_secs(ttl_secs: i64) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl_secs,
        }
    }

    /// Store a seed and return the token to carry in the redirect URL.
    pub fn put(&self, seed: UploadSeed) -> Uuid {
        let token = Uuid::new_v4();
        let mut inner = self.inner.lock();
        let now = Utc::now();
        inner.retain(|_, stored| !self.expired(stored, now));
        inner.insert(
            token,
            StoredSeed {
                seed,
                stored_at: now,
            },
        );
        token
    }

    /// Consume a seed. Returns `None` for unknown, already-consumed, or
    /// expired tokens; the caller then treats the entry as already read.
    pub fn take(&self, token: Uuid) -> Option<UploadSeed> {
        let mut inner = self.inner.lock();
        let stored = inner.remove(&token)?;
        if self.expired(&stored, Utc::now()) {
            return None;
        }
        Some(stored.seed)
    }

    fn expired(&self, stored: &StoredSeed, now: DateTime<Utc>) -> bool {
        now - stored.stored_at > Duration::seconds(self.ttl_secs)
    }
}
