use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn get_current_account(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<AccountData> {
    ApiSuccess::new(StatusCode::OK, (&principal.account).into())
}
