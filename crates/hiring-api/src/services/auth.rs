//! Credential checks and the single active session.
//!
//! Users are matched by exact email and password against the stored user
//! list. A successful login overwrites whatever session existed before; the
//! new one expires 24 hours after issuance. Expired sessions are purged the
//! first time anything looks at them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use hiring_models::{generate_token, Role, Session, User};
use hiring_store::{HiringStore, Latency, StoreError};

use crate::metrics;
use crate::security::sanitize_string;

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No active session. Please login.")]
    NoSession,

    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// True when the caller simply has no usable session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::NoSession | AuthError::SessionExpired)
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Auth operations over the hiring store.
#[derive(Clone)]
pub struct AuthService {
    store: HiringStore,
    latency: Latency,
}

impl AuthService {
    pub fn new(store: HiringStore) -> Self {
        let latency = store.latency();
        Self { store, latency }
    }

    /// Check credentials and start a new session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        self.latency.simulate().await;

        let Some(record) = self.store.users.find_by_credentials(email, password).await? else {
            warn!("Login failed for {}", sanitize_string(email));
            metrics::record_login("failure");
            return Err(AuthError::InvalidCredentials);
        };

        let user = record.sanitize();
        let session = Session::issue(user.clone(), generate_token(), Utc::now());
        self.store.session.save(&session).await?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        metrics::record_login("success");

        Ok(LoginResult {
            user,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Remove the session, if any.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.latency.simulate().await;
        self.store.session.clear().await?;
        info!("User logged out");
        Ok(())
    }

    /// The signed-in user.
    pub async fn current_user(&self) -> Result<User, AuthError> {
        self.latency.simulate().await;
        Ok(self.current_session().await?.user)
    }

    /// The stored session, provided it has not expired.
    pub async fn current_session(&self) -> Result<Session, AuthError> {
        let session = self.store.session.get().await?.ok_or(AuthError::NoSession)?;

        if session.is_expired_at(Utc::now()) {
            self.store.session.clear().await?;
            info!(user_id = %session.user.id, "Session expired");
            metrics::record_session_expired();
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// The current session, provided `token` is the one it was issued with.
    pub async fn authorize(&self, token: Option<&str>) -> Result<Session, AuthError> {
        let token = token.ok_or(AuthError::NoSession)?;
        let session = self.current_session().await?;
        if session.token != token {
            return Err(AuthError::NoSession);
        }
        Ok(session)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_role().await.is_some()
    }

    pub async fn is_admin(&self) -> bool {
        self.current_role().await == Some(Role::Admin)
    }

    pub async fn is_applicant(&self) -> bool {
        self.current_role().await == Some(Role::Applicant)
    }

    async fn current_role(&self) -> Option<Role> {
        match self.current_session().await {
            Ok(session) => Some(session.user.role),
            Err(AuthError::Store(e)) => {
                warn!("Failed to read session: {}", e);
                None
            }
            Err(_) => None,
        }
    }

    /// Restore the seeded user list.
    pub async fn reset_users(&self) -> Result<(), AuthError> {
        self.store.users.reset().await?;
        Ok(())
    }

    /// Remove the session and the user list.
    pub async fn clear_storage(&self) -> Result<(), AuthError> {
        self.store.session.clear().await?;
        self.store.users.clear().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tokio_test::assert_err;

    fn service() -> (HiringStore, AuthService) {
        let store = HiringStore::in_memory();
        let auth = AuthService::new(store.clone());
        (store, auth)
    }

    #[tokio::test]
    async fn test_login_issues_24h_session() {
        let (store, auth) = service();
        let before = Utc::now();

        let result = auth.login("admin@rakamin.com", "admin123").await.unwrap();

        assert_eq!(result.user.role, Role::Admin);
        assert!(result.token.starts_with("token_"));

        let session = store.session.get().await.unwrap().unwrap();
        assert_eq!(session.token, result.token);
        assert_eq!(session.expires_at, result.expires_at);
        assert!(session.expires_at >= before + Duration::hours(24));
        assert!(session.expires_at <= Utc::now() + Duration::hours(24));
    }

    #[tokio::test]
    async fn test_invalid_credentials_write_nothing() {
        let (store, auth) = service();

        let err = auth.login("admin@rakamin.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_err!(auth.login("nobody@rakamin.com", "admin123").await);

        assert!(store.session.get().await.unwrap().is_none());
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_new_login_replaces_session() {
        let (_, auth) = service();
        let first = auth.login("admin@rakamin.com", "admin123").await.unwrap();
        let second = auth.login("applicant@rakamin.com", "applicant123").await.unwrap();

        assert!(matches!(
            auth.authorize(Some(&first.token)).await,
            Err(AuthError::NoSession)
        ));
        let session = auth.authorize(Some(&second.token)).await.unwrap();
        assert_eq!(session.user.role, Role::Applicant);
        assert!(auth.is_applicant().await);
        assert!(!auth.is_admin().await);
    }

    #[tokio::test]
    async fn test_expired_session_is_purged() {
        let (store, auth) = service();
        let result = auth.login("admin@rakamin.com", "admin123").await.unwrap();

        let mut session = store.session.get().await.unwrap().unwrap();
        session.expires_at = Utc::now() - Duration::seconds(1);
        store.session.save(&session).await.unwrap();

        let err = auth.current_user().await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
        assert!(store.session.get().await.unwrap().is_none());

        // gone for every later query too
        assert!(!auth.is_admin().await);
        assert!(matches!(
            auth.authorize(Some(&result.token)).await,
            Err(AuthError::NoSession)
        ));
    }

    #[tokio::test]
    async fn test_logout_and_missing_token() {
        let (_, auth) = service();
        let result = auth.login("admin@rakamin.com", "admin123").await.unwrap();

        assert!(matches!(auth.authorize(None).await, Err(AuthError::NoSession)));
        assert_eq!(auth.current_user().await.unwrap().email, "admin@rakamin.com");

        auth.logout().await.unwrap();
        assert!(matches!(
            auth.current_user().await,
            Err(AuthError::NoSession)
        ));
        assert!(auth.authorize(Some(&result.token)).await.is_err());

        // logging out twice is fine
        auth.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_storage_then_reset_users() {
        let (store, auth) = service();
        auth.login("admin@rakamin.com", "admin123").await.unwrap();

        auth.clear_storage().await.unwrap();
        assert!(store.session.get().await.unwrap().is_none());

        auth.reset_users().await.unwrap();
        assert!(auth.login("admin@rakamin.com", "admin123").await.is_ok());
    }
}
