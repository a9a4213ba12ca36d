//! Session store backed by a moka cache.
//!
//! Handlers receive the store through `AppState`; nothing here is global.

use chrono::Utc;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::models::{Session, UserProfile};

/// Active sessions keyed by token
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    /// Sessions expire `ttl` after login.
    pub fn new(max_sessions: u64, ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Start a session for `user` under a fresh token.
    pub async fn login(&self, user: UserProfile) -> Arc<Session> {
        let session = Arc::new(Session {
            token: Uuid::new_v4(),
            user,
            created_at: Utc::now(),
        });
        self.sessions.insert(session.token, session.clone()).await;
        info!(user_id = %session.user.id, role = %session.user.role, "Session started");
        session
    }

    pub async fn current(&self, token: &Uuid) -> Option<Arc<Session>> {
        self.sessions.get(token).await
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &Uuid) -> bool {
        let removed = self.sessions.remove(token).await;
        if let Some(session) = &removed {
            info!(user_id = %session.user.id, "Session ended");
        }
        removed.is_some()
    }

    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
