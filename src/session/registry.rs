// Server-side registry of live portal sessions, keyed by session id

use super::types::PortalSession;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Clone)]
struct RegistryEntry {
    session: PortalSession,
    expires_at: DateTime<Utc>,
}

/// Live portal sessions held on behalf of HTTP clients
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, RegistryEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an authenticated session until `expires_at` and return its new id.
    /// Expired entries are pruned on the way in.
    pub async fn insert(&self, session: PortalSession, expires_at: DateTime<Utc>) -> String {
        self.cleanup_expired().await;

        let session_id = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id.clone(),
            RegistryEntry {
                session,
                expires_at,
            },
        );
        debug!("Registered portal session {}", session_id);
        session_id
    }

    /// A live session; expired entries read as missing
    pub async fn get(&self, session_id: &str) -> Option<PortalSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.session.clone())
    }

    /// Remove a session, returning it if it was live
    pub async fn remove(&self, session_id: &str) -> Option<PortalSession> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id);
        if removed.is_some() {
            info!("Ended portal session {}", session_id);
        }
        removed
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.session)
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);

        let count = before - sessions.len();
        if count > 0 {
            debug!("Cleaned up {} expired portal sessions", count);
        }
        count
    }
}
