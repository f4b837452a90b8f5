use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::RawClaims;
use super::errors::JwtError;

/// Verifies bearer tokens minted by [`TokenIssuer`](super::TokenIssuer).
///
/// Validation is a pure function of the token, the secret and the supplied
/// time. The signature is always checked before expiry.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a new token validator with the secret the issuer signs with.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock, not the library's
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decode and validate a token at time `now`.
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `MalformedToken` - Not a three-part JWT with a readable header
    /// * `InvalidSignature` - Tampered, signed with another secret or algorithm
    /// * `MalformedClaims` - Subject, issued-at or expiration missing or invalid
    /// * `Expired` - `now` is at or past the expiration time
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        decode_header(token).map_err(|e| JwtError::MalformedToken(e.to_string()))?;

        let token_data =
            decode::<RawClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidSignature
                    }
                    ErrorKind::InvalidToken => JwtError::MalformedToken(e.to_string()),
                    _ => JwtError::MalformedClaims(e.to_string()),
                }
            })?;

        let claims = Claims::try_from(token_data.claims)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
