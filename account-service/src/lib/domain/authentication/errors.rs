use thiserror::Error;

use crate::account::errors::AccountError;

/// Caller-visible authentication failures.
///
/// Messages are deliberately uniform: login never reveals whether the
/// username exists, and authorization never reveals why a token was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Authentication unavailable: {0}")]
    Internal(String),
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
