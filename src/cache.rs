//! In-memory caching using moka
//!
//! Sessions and open checkouts live here. Nothing is persisted; a restart
//! logs everyone out and drops unfinished checkouts.

use serde::Serialize;

use crate::checkout::CheckoutStore;
use crate::config::Config;
use crate::session::SessionStore;

const MAX_SESSIONS: u64 = 10_000;
const MAX_CHECKOUTS: u64 = 5_000;

/// Application cache holding sessions and checkouts
#[derive(Clone)]
pub struct AppCache {
    /// Sessions (token -> Session), expire after login
    pub sessions: SessionStore,
    /// Checkouts (id -> Checkout), expire when idle
    pub checkouts: CheckoutStore,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: SessionStore::new(MAX_SESSIONS, config.session_ttl),
            checkouts: CheckoutStore::new(MAX_CHECKOUTS, config.checkout_ttl),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            sessions: self.sessions.entry_count(),
            checkouts: self.checkouts.entry_count(),
        }
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub sessions: u64,
    pub checkouts: u64,
}
