use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token claim set.
///
/// Only the registered `sub`, `iat` and `exp` claims are carried; nothing
/// else about the account ever enters the token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` valid from `issued_at` for `ttl`.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the instant of its expiration.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// Claims as found on the wire, before required fields are checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    sub: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
}

impl TryFrom<RawClaims> for Claims {
    type Error = JwtError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let sub = raw
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| JwtError::MalformedClaims("missing subject".to_string()))?;
        let iat = raw
            .iat
            .ok_or_else(|| JwtError::MalformedClaims("missing issued-at".to_string()))?;
        let exp = raw
            .exp
            .ok_or_else(|| JwtError::MalformedClaims("missing expiration".to_string()))?;

        Ok(Self { sub, iat, exp })
    }
}
