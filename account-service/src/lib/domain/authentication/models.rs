use chrono::DateTime;
use chrono::Utc;

use crate::account::models::Password;

/// Username and password submitted at login.
///
/// The username is kept raw: a malformed one is just another failed login.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: Password,
}

impl Credentials {
    pub fn new(username: String, password: Password) -> Self {
        Self { username, password }
    }
}

/// Bearer token handed to the client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub const TOKEN_TYPE: &'static str = "bearer";
}
