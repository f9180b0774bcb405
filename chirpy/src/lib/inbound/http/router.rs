use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::chirps::create_chirp;
use super::handlers::chirps::delete_chirp;
use super::handlers::chirps::get_chirp;
use super::handlers::chirps::list_chirps;
use super::handlers::healthz::healthz;
use super::handlers::login::login;
use super::handlers::polka_webhook::polka_webhook;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::users::create_user;
use super::handlers::users::update_user;
use crate::chirp::ports::ChirpServicePort;
use crate::session::ports::SessionServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub polka_api_key: Arc<str>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    chirp_service: Arc<dyn ChirpServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    authenticator: Arc<Authenticator>,
    polka_api_key: &str,
) -> Router {
    let state = AppState {
        user_service,
        chirp_service,
        session_service,
        authenticator,
        polka_api_key: Arc::from(polka_api_key),
    };

    // Authorization headers carry credentials; spans only record the request line.
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
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(create_user).put(update_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
        .route("/api/chirps", post(create_chirp).get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp).delete(delete_chirp))
        .route("/api/polka/webhooks", post(polka_webhook))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
