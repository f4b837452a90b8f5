use async_trait::async_trait;

use crate::account::models::Account;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::Credentials;

/// Port for login and per-request authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials against the stored account and mint a bearer token.
    ///
    /// # Arguments
    /// * `credentials` - Submitted username and plaintext password
    ///
    /// # Returns
    /// Signed access token naming the username as subject
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Internal` - Record store or token encoding failed
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;

    /// Resolve a bearer token to the live account it names.
    ///
    /// # Arguments
    /// * `bearer_token` - Token taken from the Authorization header, if any
    ///
    /// # Returns
    /// The authenticated principal
    ///
    /// # Errors
    /// * `Unauthenticated` - Token missing, malformed, forged, expired, or its account is gone
    /// * `Internal` - Record store failed
    async fn authorize(&self, bearer_token: Option<&str>) -> Result<Account, AuthError>;
}
