//! Axum routes for catalog, note and instruction endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    add_instruction, add_item, add_note, get_instruction, get_item, list_instructions,
    list_items, list_notes, set_item_image,
};

/// # Routes
///
/// ## Public reads
/// - `GET /api/items`, `GET /api/items/:id`
/// - `GET /api/equipment-notes?item_id=`
/// - `GET /api/instructions?item_id=`, `GET /api/instructions/:id`
///
/// ## Protected writes
/// - `POST /api/items`, `PUT /api/items/:id/image`
/// - `POST /api/equipment-notes`
/// - `POST /api/instructions`
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items).post(add_item))
        .route("/api/items/:id", get(get_item))
        .route("/api/items/:id/image", put(set_item_image))
        .route("/api/equipment-notes", get(list_notes).post(add_note))
        .route(
            "/api/instructions",
            get(list_instructions).post(add_instruction),
        )
        .route("/api/instructions/:id", get(get_instruction))
}
