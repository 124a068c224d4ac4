use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::execute;
use super::handlers::session::clear_session;
use super::handlers::session::set_session;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::user::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub project_service: Arc<dyn ProjectServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Credentialed CORS for a single known origin, permissive otherwise.
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let Some(origin) = allowed_origin else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Ignoring unparsable allowed origin");
            CorsLayer::permissive()
        }
    }
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    project_service: Arc<dyn ProjectServicePort>,
    authenticator: Arc<Authenticator>,
    allowed_origin: Option<&str>,
) -> Router {
    let state = AppState {
        identity_service,
        project_service,
        authenticator,
    };

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
        .route("/api/operations", post(execute))
        .route("/api/session", post(set_session).delete(clear_session))
        .layer(trace_layer)
        .layer(cors_layer(allowed_origin))
        .with_state(state)
}
