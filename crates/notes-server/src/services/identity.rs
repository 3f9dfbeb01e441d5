//! Account registration and login.

use std::sync::Arc;

use chrono::Utc;
use notes_core::{Account, AccountId, validate};
use notes_store::{AccountRepository, NewAccount, StoreError};

use crate::auth::{self, AuthError, IssuedToken, TokenService};

/// Identity failures.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid email format provided")]
    InvalidEmail,

    #[error("password must be at least {} characters", notes_core::MIN_PASSWORD_LEN)]
    WeakPassword,

    #[error("email already in use")]
    EmailExists,

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account not found")]
    NotFound,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error: {0}")]
    Store(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for IdentityError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => Self::EmailExists,
            other => Self::Store(other),
        }
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub token: IssuedToken,
}

/// Registers accounts and exchanges credentials for bearer tokens.
#[derive(Clone)]
pub struct IdentityService {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenService,
}

impl IdentityService {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: TokenService) -> Self {
        Self { accounts, tokens }
    }

    /// Create an account.
    ///
    /// The email is checked up front; a concurrent registration that slips
    /// past the check is caught by the unique index and reported the same way.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Account, IdentityError> {
        validate::email(email).map_err(|_| IdentityError::InvalidEmail)?;
        validate::password(password).map_err(|_| IdentityError::WeakPassword)?;

        if self.accounts.get_account_by_email(email).await?.is_some() {
            return Err(IdentityError::EmailExists);
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
            .await
            .map_err(|e| IdentityError::Internal(e.to_string()))??;

        let row = self
            .accounts
            .insert_account(&NewAccount {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(account_id = %row.id, "account registered");
        Ok(row.into())
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let Some(row) = self.accounts.get_account_by_email(email).await? else {
            tracing::debug!("login for unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = row.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash))
            .await
            .map_err(|e| IdentityError::Internal(e.to_string()))??;
        if !matches {
            tracing::debug!(account_id = %row.id, "login with wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let account: Account = row.into();
        let token = self.tokens.issue(&account)?;
        tracing::info!(account_id = %account.id, "account logged in");
        Ok(Session { account, token })
    }

    /// The account behind an authenticated request.
    pub async fn current_account(&self, id: AccountId) -> Result<Account, IdentityError> {
        self.accounts
            .get_account_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(IdentityError::NotFound)
    }
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use notes_store::MemoryStore;

    fn service() -> IdentityService {
        IdentityService::new(
            Arc::new(MemoryStore::new()),
            TokenService::new("test-secret", TimeDelta::hours(24)),
        )
    }

    #[tokio::test]
    async fn test_register_returns_account() {
        let identity = service();
        let account = identity
            .register("someone@example.com", "Someone", "password123")
            .await
            .unwrap();
        assert_eq!(account.email, "someone@example.com");
        assert_eq!(account.name, "Someone");
    }

    #[tokio::test]
    async fn test_register_twice_fails_regardless_of_other_fields() {
        let identity = service();
        identity
            .register("dup@example.com", "First", "password123")
            .await
            .unwrap();
        let err = identity
            .register("dup@example.com", "Second", "another-password")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::EmailExists));
    }

    #[tokio::test]
    async fn test_password_length_boundary() {
        let identity = service();
        let err = identity
            .register("short@example.com", "Short", "1234567")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::WeakPassword));

        assert!(
            identity
                .register("short@example.com", "Short", "12345678")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let err = service()
            .register("not-an-email", "X", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidEmail));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_account() {
        let identity = service();
        let account = identity
            .register("login@example.com", "Login", "password123")
            .await
            .unwrap();

        let session = identity.login("login@example.com", "password123").await.unwrap();
        assert_eq!(session.account, account);

        let claims = TokenService::new("test-secret", TimeDelta::hours(24))
            .verify(&session.token.token)
            .unwrap();
        assert_eq!(claims.sub, account.id.0);
        assert_eq!(claims.email, "login@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let identity = service();
        identity
            .register("real@example.com", "Real", "password123")
            .await
            .unwrap();

        let wrong_password = identity.login("real@example.com", "password124").await.unwrap_err();
        let unknown_email = identity.login("ghost@example.com", "password123").await.unwrap_err();
        assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
        assert!(matches!(unknown_email, IdentityError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_current_account() {
        let identity = service();
        let account = identity
            .register("me@example.com", "Me", "password123")
            .await
            .unwrap();
        assert_eq!(identity.current_account(account.id).await.unwrap(), account);
        assert!(matches!(
            identity.current_account(AccountId::new()).await,
            Err(IdentityError::NotFound)
        ));
    }
}
