//! Bearer credential pair and its durable store.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, keys};

/// The access/refresh bearer-token pair identifying an authenticated session.
///
/// Persisted as JSON under [`keys::AUTH`]. `Debug` redacts both tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, attached as the bearer header.
    pub access: String,
    /// Long-lived refresh token, exchanged for a new pair on expiry.
    pub refresh: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Owns the credential pair for the whole client.
///
/// The session manager drives installs and invalidations; the gateway reads
/// the current pair for every outbound call and swaps it on a successful
/// refresh. Every invalidation bumps the **session epoch**; asynchronous
/// completions capture the epoch before suspending and discard their result
/// if it has moved, which substitutes for cancellation.
pub struct CredentialStore {
    slot: RwLock<Option<TokenPair>>,
    epoch: AtomicU64,
    storage: std::sync::Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Create a store backed by `storage`, eagerly loading any persisted
    /// pair. A missing or unparsable entry starts the session anonymous.
    #[must_use]
    pub fn new(storage: std::sync::Arc<dyn KeyValueStore>) -> Self {
        let slot = storage.get(keys::AUTH).and_then(|raw| {
            serde_json::from_str::<TokenPair>(&raw)
                .map_err(|err| {
                    tracing::warn!(error = %err, "stored credential is corrupt; starting anonymous");
                    storage.remove(keys::AUTH);
                })
                .ok()
        });

        Self {
            slot: RwLock::new(slot),
            epoch: AtomicU64::new(0),
            storage,
        }
    }

    /// The currently installed pair, if any.
    #[must_use]
    pub fn current(&self) -> Option<TokenPair> {
        self.slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Install a new pair, persisting it durably.
    ///
    /// A persistence failure is logged and the session continues in memory;
    /// the user simply has to sign in again after a restart.
    pub fn install(&self, pair: TokenPair) {
        match serde_json::to_string(&pair) {
            Ok(raw) => {
                if let Err(err) = self.storage.put(keys::AUTH, &raw) {
                    tracing::warn!(error = %err, "failed to persist credentials");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize credentials"),
        }
        *self
            .slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(pair);
    }

    /// Drop the pair from memory and durable storage and bump the epoch.
    /// Idempotent.
    pub fn invalidate(&self) {
        self.storage.remove(keys::AUTH);
        *self
            .slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// The current session epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Whether the session has been invalidated since `observed` was taken.
    #[must_use]
    pub fn is_stale(&self, observed: u64) -> bool {
        self.epoch() != observed
    }
}
