use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Issuer and validator share one secret, fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hashing cost and token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing and validation
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret),
            token_validator: TokenValidator::new(jwt_secret),
        }
    }

    /// Replace the password hasher (e.g. to tune the work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Set the lifetime of issued tokens.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_issuer = self.token_issuer.with_ttl(ttl);
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_issuer.ttl()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for an unusable hash alike.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify a password against its stored hash and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token asserts
    /// * `now` - Issue time
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unusable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject, now)?)
    }

    /// Validate a token at time `now` and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, expired or lacks a subject
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.token_validator.validate(token, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::HashingCost;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");

        Authenticator::new(SECRET).with_password_hasher(hasher)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let now = Utc::now();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let issued = authenticator
            .authenticate("my_password", &hash, "alice", now)
            .expect("Authentication failed");
        assert!(!issued.token.is_empty());

        let decoded = authenticator
            .validate_token(&issued.token, now)
            .expect("Token validation failed");
        assert_eq!(decoded.subject(), "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result =
            authenticator.authenticate("wrong_password", &hash, "alice", Utc::now());
        assert_eq!(result.unwrap_err(), AuthenticationError::InvalidCredentials);
    }

    #[test]
    fn test_authenticate_corrupted_hash() {
        let authenticator = authenticator();

        let result =
            authenticator.authenticate("my_password", "$argon2id$v=19$m=", "alice", Utc::now());
        assert_eq!(result.unwrap_err(), AuthenticationError::InvalidCredentials);
    }

    #[test]
    fn test_verify_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("wrong_password", &hash));
        assert!(!authenticator.verify_password("my_password", "not-a-hash"));
    }

    #[test]
    fn test_token_ttl_applies() {
        let authenticator = authenticator().with_token_ttl(Duration::minutes(5));
        let hash = authenticator.hash_password("pw").unwrap();
        let now = Utc::now();

        let issued = authenticator.authenticate("pw", &hash, "alice", now).unwrap();
        assert_eq!(authenticator.token_ttl(), Duration::minutes(5));
        assert_eq!(
            authenticator.validate_token(&issued.token, now + Duration::minutes(5)),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here", Utc::now());
        assert!(result.is_err());
    }
}
