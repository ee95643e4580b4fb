//! Transport-agnostic application state.
//!
//! `CoreState` is the single shared state behind the HTTP surface: the
//! table store, the clock, the credential verifier, active sessions, and
//! the registry of in-flight uploads. Wrapped in `Arc` at startup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::session::{AuthError, CredentialVerifier, DemoDirectory, Session, SessionManager};
use crate::store::{MemoryStore, TableStore};
use crate::upload::UploadMachine;

/// An upload registered by the API: which user started it and the
/// machine driving it.
#[derive(Clone)]
pub struct UploadHandle {
    pub owner: Uuid,
    pub machine: Arc<UploadMachine>,
}

pub struct CoreState {
    store: Arc<dyn TableStore>,
    clock: Arc<dyn Clock>,
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionManager,
    uploads: RwLock<HashMap<Uuid, UploadHandle>>,
}

impl CoreState {
    pub fn new(
        store: Arc<dyn TableStore>,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            store,
            clock,
            verifier,
            sessions: SessionManager::new(),
            uploads: RwLock::new(HashMap::new()),
        }
    }

    /// The demo configuration: in-memory store, wall clock, and the two
    /// fixed demo accounts.
    pub fn demo() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
            Arc::new(DemoDirectory),
        )
    }

    pub fn store(&self) -> Arc<dyn TableStore> {
        self.store.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    // ── Sessions ────────────────────────────────────────────

    /// Verify credentials and issue a bearer token for the session.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, Session), AuthError> {
        let session = self.verifier.authenticate(email, password).await?;
        tracing::info!(email = %session.email, tier = %session.tier, "user signed in");
        let token = self.sessions.issue(session.clone());
        Ok((token, session))
    }

    pub fn session_for(&self, token: &str) -> Option<Session> {
        self.sessions.resolve(token)
    }

    /// Returns true if the token was active.
    pub fn sign_out(&self, token: &str) -> bool {
        self.sessions.revoke(token)
    }

    // ── Upload registry ─────────────────────────────────────

    pub fn register_upload(&self, owner: Uuid, machine: Arc<UploadMachine>) -> Result<Uuid, CoreError> {
        let id = Uuid::new_v4();
        let mut uploads = self.uploads.write().map_err(|_| CoreError::LockPoisoned)?;
        uploads.insert(id, UploadHandle { owner, machine });
        Ok(id)
    }

    pub fn upload_handle(&self, id: &Uuid) -> Result<Option<UploadHandle>, CoreError> {
        let uploads = self.uploads.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(uploads.get(id).cloned())
    }
}

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::AccountTier;
    use crate::session::{DEMO_BASIC_EMAIL, DEMO_PREMIUM_EMAIL};

    fn state() -> CoreState {
        CoreState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::default()),
            Arc::new(DemoDirectory),
        )
    }

    #[tokio::test]
    async fn sign_in_issues_resolvable_token() {
        let state = state();
        let (token, session) = state.sign_in(DEMO_BASIC_EMAIL, "123456789").await.unwrap();
        assert_eq!(session.tier, AccountTier::Basic);

        let resolved = state.session_for(&token).unwrap();
        assert_eq!(resolved.user_id, session.user_id);
    }

    #[tokio::test]
    async fn sign_out_revokes_token() {
        let state = state();
        let (token, _) = state
            .sign_in(DEMO_PREMIUM_EMAIL, "123456789")
            .await
            .unwrap();
        assert!(state.sign_out(&token));
        assert!(state.session_for(&token).is_none());
        assert!(!state.sign_out(&token));
    }

    #[tokio::test]
    async fn bad_credentials_do_not_issue_tokens() {
        let state = state();
        let err = state.sign_in(DEMO_BASIC_EMAIL, "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn upload_registry_round_trips() {
        let state = state();
        let owner = Uuid::new_v4();
        let machine = Arc::new(UploadMachine::new(state.store(), state.clock()));

        let id = state.register_upload(owner, machine).unwrap();
        let handle = state.upload_handle(&id).unwrap().unwrap();
        assert_eq!(handle.owner, owner);

        assert!(state.upload_handle(&Uuid::new_v4()).unwrap().is_none());
    }
}
