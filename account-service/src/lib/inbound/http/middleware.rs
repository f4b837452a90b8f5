use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::models::Account;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the account resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub account: Account,
}

/// Middleware that resolves the bearer token to a live account and adds it
/// to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers()).map(str::to_owned);

    let account = state
        .auth_service
        .authorize(token.as_deref())
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut()
        .insert(AuthenticatedPrincipal { account });

    Ok(next.run(req).await)
}

/// Token carried by an `Authorization: Bearer <token>` header.
///
/// The scheme name is case-insensitive. Any other shape counts as no token
/// at all.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let (scheme, token) = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
