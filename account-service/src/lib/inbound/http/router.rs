use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_account::create_account;
use super::handlers::delete_account::delete_account;
use super::handlers::get_current_account::get_current_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::update_account::update_account;
use super::middleware::authenticate;
use crate::account::ports::AccountServicePort;
use crate::domain::authentication::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
) -> Router {
    let state = AppState {
        account_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/auth/token", post(login))
        .route("/users", get(list_accounts).post(create_account));

    let protected_routes = Router::new()
        .route("/users/me", get(get_current_account))
        .route(
            "/users/:username",
            put(update_account).delete(delete_account),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers stay out of spans: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
