//! HTTP adapters - REST API implementations.
//!
//! Each feature exposes its own routes; [`router`] merges them behind the
//! request gate and the shared tower-http layers.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod lending;
pub mod middleware;
pub mod state;

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware::from_fn_with_state, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use auth::auth_routes;
pub use catalog::catalog_routes;
pub use error::ErrorResponse;
pub use lending::lending_routes;
pub use middleware::{request_gate, RequireAuth};
pub use state::{AppState, SessionSettings};

/// Transport-level settings applied around every route.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Origins allowed to make credentialed cross-site calls.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the full application router.
pub fn router(state: AppState, settings: &RouterSettings) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(lending_routes())
        .merge(catalog_routes())
        .layer(from_fn_with_state(state.clone(), request_gate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&settings.cors_origins))
                .layer(TimeoutLayer::new(settings.request_timeout)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(middleware::AUTH_TOKEN_HEADER),
        ])
}
