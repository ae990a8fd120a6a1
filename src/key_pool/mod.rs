//! Shared credential pool
//!
//! Tracks which interchangeable free-tier keys have been rejected by a
//! provider. Keys are handed out first-available in pool order; a key marked
//! failed stays excluded until an explicit `reset`. There is no expiry and no
//! per-key reset.
//!
//! The pool is injected into the dispatcher rather than living in a global, so
//! tests and independent deployments each get their own failed set.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};

use crate::providers::mask_credential;
use crate::types::KeyStats;

pub struct KeyPool {
    keys: Vec<SecretString>,
    failed: Mutex<HashSet<String>>,
}

impl KeyPool {
    /// Build a pool from keys in priority order. Blank and duplicate entries
    /// are dropped.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .map(Into::into)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .map(SecretString::from)
            .collect();
        Self {
            keys,
            failed: Mutex::new(HashSet::new()),
        }
    }

    pub fn from_secrets(keys: Vec<SecretString>) -> Self {
        Self::new(keys.iter().map(|k| k.expose_secret().to_string()))
    }

    fn failed_set(&self) -> MutexGuard<'_, HashSet<String>> {
        self.failed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// First pool key not marked failed. Repeated calls without a failure in
    /// between return the same key.
    pub fn next_available(&self) -> Option<SecretString> {
        let failed = self.failed_set();
        self.keys
            .iter()
            .find(|k| !failed.contains(k.expose_secret()))
            .map(|k| SecretString::from(k.expose_secret().to_string()))
    }

    /// Exclude a key until the next `reset`. Idempotent.
    pub fn mark_failed(&self, credential: &str) {
        let inserted = self.failed_set().insert(credential.to_string());
        if inserted {
            tracing::warn!(
                key = %mask_credential(credential),
                "marked credential as failed"
            );
        }
    }

    /// Clear the failed set entirely.
    pub fn reset(&self) {
        let cleared = {
            let mut failed = self.failed_set();
            let n = failed.len();
            failed.clear();
            n
        };
        tracing::info!(cleared, "reset failed credential set");
    }

    pub fn is_failed(&self, credential: &str) -> bool {
        self.failed_set().contains(credential)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Counters in the `/key-stats` shape. Only failed keys that belong to the
    /// pool are counted.
    pub fn stats(&self) -> KeyStats {
        let failed = self.failed_set();
        let failed_keys = self
            .keys
            .iter()
            .filter(|k| failed.contains(k.expose_secret()))
            .count();
        KeyStats {
            total_keys: self.keys.len(),
            failed_keys,
            available_keys: self.keys.len() - failed_keys,
        }
    }
}

impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("KeyPool")
            .field("total_keys", &stats.total_keys)
            .field("failed_keys", &stats.failed_keys)
            .finish()
    }
}
