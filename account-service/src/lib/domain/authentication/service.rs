use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Clock;

use crate::account::models::Account;
use crate::account::models::Password;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::ports::AuthServicePort;

/// Plaintext behind the hash that stands in for a missing account.
const ABSENT_ACCOUNT_PASSWORD: &str = "absent-account-placeholder";

/// Login and request authorization over the account record store.
///
/// Tokens are stateless, so every authorization re-reads the account: a
/// deleted or renamed account invalidates its outstanding tokens at once.
pub struct AuthService<AR, C>
where
    AR: AccountRepository,
    C: Clock,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    clock: Arc<C>,
    absent_account_hash: Arc<str>,
}

impl<AR, C> AuthService<AR, C>
where
    AR: AccountRepository,
    C: Clock,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Shared credential hasher and token handler
    /// * `clock` - Time source for token issue and expiry checks
    ///
    /// # Errors
    /// * `Internal` - The placeholder hash for absent accounts could not be computed
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
        clock: Arc<C>,
    ) -> Result<Self, AuthError> {
        let absent_account_hash = authenticator
            .hash_password(ABSENT_ACCOUNT_PASSWORD)
            .map_err(|e| AuthError::Internal(format!("Placeholder hash failed: {}", e)))?;

        Ok(Self {
            repository,
            authenticator,
            clock,
            absent_account_hash: Arc::from(absent_account_hash),
        })
    }

    /// Fail a login that has no account to check against.
    ///
    /// Runs one verification against the placeholder hash first, so the
    /// answer takes as long as a wrong password does.
    async fn reject(&self, password: Password) -> AuthError {
        let authenticator = Arc::clone(&self.authenticator);
        let absent_account_hash = Arc::clone(&self.absent_account_hash);

        let verified = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.expose(), &absent_account_hash)
        })
        .await;

        match verified {
            Ok(_) => AuthError::InvalidCredentials,
            Err(e) => AuthError::Internal(format!("Password verification task failed: {}", e)),
        }
    }
}

#[async_trait]
impl<AR, C> AuthServicePort for AuthService<AR, C>
where
    AR: AccountRepository,
    C: Clock,
{
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let Ok(username) = Username::new(credentials.username) else {
            tracing::info!("Login rejected: malformed username");
            return Err(self.reject(credentials.password).await);
        };

        let Some(account) = self.repository.find_by_username(&username).await? else {
            tracing::info!(username = %username, "Login rejected");
            return Err(self.reject(credentials.password).await);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let now = self.clock.now();
        let password = credentials.password;
        let password_hash = account.password_hash;
        let subject = account.username.to_string();

        let issued = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &password_hash, &subject, now)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::info!(username = %username, "Login rejected");
                AuthError::InvalidCredentials
            }
            AuthenticationError::JwtError(err) => {
                tracing::error!(error = %err, "Token generation failed");
                AuthError::Internal(format!("Token generation failed: {}", err))
            }
        })?;

        let expires_at = issued
            .claims
            .expires_at()
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;

        tracing::info!(
            account_id = %account.id,
            username = %username,
            expires_at = %expires_at,
            "Access token issued"
        );

        Ok(AccessToken {
            token: issued.token,
            expires_at,
        })
    }

    async fn authorize(&self, bearer_token: Option<&str>) -> Result<Account, AuthError> {
        let Some(token) = bearer_token else {
            tracing::debug!("Request carries no bearer token");
            return Err(AuthError::Unauthenticated);
        };

        let claims = self
            .authenticator
            .validate_token(token, self.clock.now())
            .map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                AuthError::Unauthenticated
            })?;

        let username = Username::new(claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "Token subject is not a valid username");
            AuthError::Unauthenticated
        })?;

        match self.repository.find_by_username(&username).await? {
            Some(account) => Ok(account),
            None => {
                tracing::debug!(username = %username, "Token subject no longer exists");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
