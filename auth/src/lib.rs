//! Authentication utilities library
//!
//! Provides the credential and token infrastructure used by the account service:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and validation (HS256 JWT)
//! - Injectable clocks
//! - Authentication coordination
//!
//! Nothing here knows about accounts or storage; the service adapts these
//! building blocks to its own record store.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenValidator};
//! use chrono::Utc;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let validator = TokenValidator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let now = Utc::now();
//! let issued = issuer.issue("alice", now).unwrap();
//! let claims = validator.validate(&issued.token, now).unwrap();
//! assert_eq!(claims.subject(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let issued = auth.authenticate("password123", &hash, "alice", Utc::now()).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token, Utc::now()).unwrap();
//! assert_eq!(claims.subject(), "alice");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
