//! Sessions and credential verification.
//!
//! There is no global "current user": a `Session` value is resolved per
//! request from a bearer token and threaded explicitly through every
//! operation. Credential checking sits behind the `CredentialVerifier`
//! trait so the demo directory can be swapped for a real identity
//! provider without touching the rest of the application.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::AccountTier;

/// Namespace for deriving stable user ids from email addresses, so a
/// user's rows survive re-login across process restarts.
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_f2ab_93d4_4c0e_9d3a_7b52_8e61_20c7);

/// The authenticated user for the duration of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub tier: AccountTier,
}

impl Session {
    pub fn new(email: &str, tier: AccountTier) -> Self {
        Self {
            user_id: Uuid::new_v5(&USER_ID_NAMESPACE, email.as_bytes()),
            email: email.to_string(),
            tier,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately identical for unknown accounts and wrong passwords,
    /// so responses cannot be used to enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Credential/entitlement verification capability.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}

/// The two demo accounts. Everything else fails with the generic message.
pub struct DemoDirectory;

pub const DEMO_BASIC_EMAIL: &str = "normaluser@gmail.com";
pub const DEMO_PREMIUM_EMAIL: &str = "premiumuser@gmail.com";
const DEMO_PASSWORD: &str = "123456789";

#[async_trait]
impl CredentialVerifier for DemoDirectory {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email == DEMO_PREMIUM_EMAIL && password == DEMO_PASSWORD {
            return Ok(Session::new(email, AccountTier::Premium));
        }
        if email == DEMO_BASIC_EMAIL && password == DEMO_PASSWORD {
            return Ok(Session::new(email, AccountTier::Basic));
        }
        Err(AuthError::InvalidCredentials)
    }
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Token → session map for the lifetime of the process. Nothing here is
/// persisted; a restart signs everyone out.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store the session and hand back its bearer token.
    pub fn issue(&self, session: Session) -> String {
        let token = generate_token();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.clone(), session);
        }
        token
    }

    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(token).cloned())
    }

    /// Returns true if the token was active.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .map(|mut sessions| sessions.remove(token).is_some())
            .unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn premium_demo_account_authenticates() {
        let session = DemoDirectory
            .authenticate(DEMO_PREMIUM_EMAIL, "123456789")
            .await
            .unwrap();
        assert_eq!(session.tier, AccountTier::Premium);
        assert_eq!(session.email, DEMO_PREMIUM_EMAIL);
    }

    #[tokio::test]
    async fn basic_demo_account_authenticates() {
        let session = DemoDirectory
            .authenticate(DEMO_BASIC_EMAIL, "123456789")
            .await
            .unwrap();
        assert_eq!(session.tier, AccountTier::Basic);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let wrong_password = DemoDirectory
            .authenticate(DEMO_BASIC_EMAIL, "hunter2")
            .await
            .unwrap_err();
        let unknown_user = DemoDirectory
            .authenticate("nobody@example.com", "123456789")
            .await
            .unwrap_err();
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.to_string(), "Invalid email or password");
    }

    #[test]
    fn user_ids_are_stable_per_email() {
        let a = Session::new(DEMO_BASIC_EMAIL, AccountTier::Basic);
        let b = Session::new(DEMO_BASIC_EMAIL, AccountTier::Basic);
        let other = Session::new(DEMO_PREMIUM_EMAIL, AccountTier::Premium);
        assert_eq!(a.user_id, b.user_id);
        assert_ne!(a.user_id, other.user_id);
    }

    #[test]
    fn tokens_resolve_until_revoked() {
        let manager = SessionManager::new();
        let token = manager.issue(Session::new(DEMO_BASIC_EMAIL, AccountTier::Basic));

        let resolved = manager.resolve(&token).unwrap();
        assert_eq!(resolved.email, DEMO_BASIC_EMAIL);

        assert!(manager.revoke(&token));
        assert!(manager.resolve(&token).is_none());
        assert!(!manager.revoke(&token));
    }

    #[test]
    fn tokens_are_unique() {
        let manager = SessionManager::new();
        let a = manager.issue(Session::new(DEMO_BASIC_EMAIL, AccountTier::Basic));
        let b = manager.issue(Session::new(DEMO_BASIC_EMAIL, AccountTier::Basic));
        assert_ne!(a, b);
        assert_eq!(manager.active_count(), 2);
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let manager = SessionManager::new();
        assert!(manager.resolve("not-a-token").is_none());
    }
}
