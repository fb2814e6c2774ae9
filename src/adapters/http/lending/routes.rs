//! Axum routes for lending endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{borrow_item, open_borrows, return_item};

/// # Routes
///
/// - `POST /api/items/borrow`
/// - `POST /api/items/return`
/// - `GET /api/items/open-borrows`
pub fn lending_routes() -> Router<AppState> {
    Router::new()
        .route("/api/items/borrow", post(borrow_item))
        .route("/api/items/return", post(return_item))
        .route("/api/items/open-borrows", get(open_borrows))
}
