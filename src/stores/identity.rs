// ABOUTME: Identity store holding the session's authenticated identity
// ABOUTME: Implements the Anonymous/Authenticated machine with persisted session state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::storage::AUTH_STORAGE_KEY;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::{Identity, SessionState};
use crate::notifications::{EventStream, SessionAction, SessionEvent};
use crate::storage::{load_snapshot, save_snapshot, StateStorage};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info};

/// Session identity holder
///
/// Performs no credential checks; whatever identity the caller supplies
/// becomes the authenticated session.
pub struct IdentityStore {
    session: RwLock<SessionState>,
    storage: Arc<dyn StateStorage>,
    events: EventStream<SessionEvent>,
}

impl IdentityStore {
    /// Create an anonymous store; nothing is read from `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, event_buffer: usize) -> Self {
        Self::with_session(storage, event_buffer, SessionState::Anonymous)
    }

    /// Create a store restored from the session snapshot in `storage`
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the snapshot cannot be
    /// read, or `SchemaVersionMismatch` for a snapshot of another version
    pub async fn open(storage: Arc<dyn StateStorage>, event_buffer: usize) -> AppResult<Self> {
        let session: SessionState = load_snapshot(storage.as_ref(), AUTH_STORAGE_KEY)
            .await?
            .unwrap_or_default();
        info!(
            authenticated = session.is_authenticated(),
            backend = storage.backend_name(),
            "Identity store restored"
        );
        Ok(Self::with_session(storage, event_buffer, session))
    }

    fn with_session(
        storage: Arc<dyn StateStorage>,
        event_buffer: usize,
        session: SessionState,
    ) -> Self {
        Self {
            session: RwLock::new(session),
            storage,
            events: EventStream::new(event_buffer),
        }
    }

    /// Current session state
    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    /// Current identity, if authenticated
    pub async fn current_identity(&self) -> Option<Identity> {
        self.session.read().await.identity().cloned()
    }

    /// Whether an identity is present
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Subscribe to session events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Authenticate as `identity`, replacing any current identity
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be persisted; the
    /// previous session is kept in that case
    pub async fn login(&self, identity: Identity) -> AppResult<()> {
        self.sign_in(identity, SessionAction::Login).await
    }

    /// Authenticate a newly registered `identity`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be persisted
    pub async fn register(&self, identity: Identity) -> AppResult<()> {
        self.sign_in(identity, SessionAction::Register).await
    }

    /// Clear the identity
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be persisted
    pub async fn logout(&self) -> AppResult<()> {
        let mut guard = self.session.write().await;
        let user_id = guard.identity().map(|identity| identity.id.clone());
        let next = SessionState::Anonymous;
        self.persist(&next).await?;
        *guard = next;

        self.events.publish(SessionEvent::LoggedOut {
            user_id: user_id.clone(),
        });
        AppLogger::log_auth_event(user_id.as_deref().unwrap_or("anonymous"), "logout", true, None);
        Ok(())
    }

    /// Write the current session to storage
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error
    pub async fn flush(&self) -> AppResult<()> {
        let guard = self.session.read().await;
        self.persist(&guard).await
    }

    async fn sign_in(&self, identity: Identity, action: SessionAction) -> AppResult<()> {
        let event_name = match action {
            SessionAction::Login => "login",
            SessionAction::Register => "register",
        };
        let mut guard = self.session.write().await;
        let user_id = identity.id.clone();
        let next = SessionState::Authenticated { user: identity };

        if let Err(e) = self.persist(&next).await {
            error!(user.id = %user_id, error = %e, "Session change rolled back");
            AppLogger::log_auth_event(&user_id, event_name, false, Some(&e.message));
            return Err(e);
        }
        *guard = next;

        self.events.publish(SessionEvent::LoggedIn {
            user_id: user_id.clone(),
            action,
        });
        AppLogger::log_auth_event(&user_id, event_name, true, None);
        Ok(())
    }

    async fn persist(&self, session: &SessionState) -> AppResult<()> {
        let saved = save_snapshot(self.storage.as_ref(), AUTH_STORAGE_KEY, session).await;
        AppLogger::log_storage_operation(
            self.storage.backend_name(),
            "save",
            AUTH_STORAGE_KEY,
            saved.is_ok(),
        );
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    #[tokio::test]
    async fn test_login_replaces_identity() {
        let store = IdentityStore::new(Arc::new(MemoryStorage::new()), 8);
        store
            .login(Identity::new("user1", "ItalianChef", "italian@example.com"))
            .await
            .unwrap();
        store
            .login(Identity::new("user2", "SpiceQueen", "spice@example.com"))
            .await
            .unwrap();
        assert_eq!(store.current_identity().await.unwrap().id, "user2");
    }
}
