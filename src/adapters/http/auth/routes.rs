//! Axum routes for authentication and health endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{healthz, login, logout, register};

/// # Routes
///
/// - `POST /api/auth/login`
/// - `POST /api/auth/logout`
/// - `POST /api/auth/register`
/// - `GET /api/healthz`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/register", post(register))
        .route("/api/healthz", get(healthz))
}
