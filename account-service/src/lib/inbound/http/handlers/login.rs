use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::account::models::Password;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::Credentials;
use crate::inbound::http::router::AppState;

/// OAuth2 password-grant style token endpoint.
///
/// Responds with a bare `{access_token, token_type}` object so standard
/// bearer clients can consume it.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    // An empty password can never match; answer like any other failed login
    let password =
        Password::new(form.password).map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

    state
        .auth_service
        .login(Credentials::new(form.username, password))
        .await
        .map_err(ApiError::from)
        .map(|access_token| Json(access_token.into()))
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<AccessToken> for TokenResponse {
    fn from(access_token: AccessToken) -> Self {
        Self {
            access_token: access_token.token,
            token_type: AccessToken::TOKEN_TYPE.to_string(),
        }
    }
}
