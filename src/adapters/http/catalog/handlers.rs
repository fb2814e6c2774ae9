//! HTTP handlers for catalog, note and instruction endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::catalog::{AddItemCommand, SetItemImageCommand};
use crate::domain::equipment::{CatalogError, NewInstruction, NewItemDraft, NewNote};
use crate::domain::foundation::{InstructionId, ItemId, ValidationError};
use crate::ports::ItemQuery;

use super::super::auth::dto::OkResponse;
use super::super::error::{error_response, json_body, path_id, status_for};
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CreateInstructionRequest, CreateNoteRequest, CreatedResponse, InstructionResponse,
    InstructionSummaryResponse, ItemIdParams, ItemResponse, ListItemsParams, NoteResponse,
    SetImageRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Items
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ListItemsParams>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let Query(params) = params.map_err(|e| ValidationError::rule(e.body_text()))?;
    let query = ItemQuery::new(params.q, params.limit, params.offset);

    let items = state.list_items_handler().handle(query).await?;
    let body: Vec<ItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let id = ItemId::new(path_id(id, "id")?)?;
    let item = state.get_item_handler().handle(id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// POST /api/items
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    payload: Result<Json<NewItemDraft>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let draft = json_body(payload)?;
    let item = state
        .add_item_handler()
        .handle(AddItemCommand { actor, draft })
        .await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// PUT /api/items/:id/image
pub async fn set_item_image(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SetImageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let item_id = ItemId::new(path_id(id, "id")?)?;
    let req = json_body(payload)?;
    state
        .set_item_image_handler()
        .handle(SetItemImageCommand {
            item_id,
            image_url: req.image_url,
        })
        .await?;
    Ok(Json(OkResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Notes
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/equipment-notes?item_id=
pub async fn list_notes(
    State(state): State<AppState>,
    params: Result<Query<ItemIdParams>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let item_id = required_item_id(params)?;
    let notes = state.attachments_handler().list_notes(item_id).await?;
    let body: Vec<NoteResponse> = notes.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/equipment-notes
pub async fn add_note(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let req = json_body(payload)?;
    let author = req
        .created_by
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(actor.username);
    let note = NewNote::new(req.item_id, &req.note_text, Some(author))?;

    let id = state.attachments_handler().add_note(note).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.as_i64() })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Instructions
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/instructions?item_id=
pub async fn list_instructions(
    State(state): State<AppState>,
    params: Result<Query<ItemIdParams>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let item_id = required_item_id(params)?;
    let summaries = state.attachments_handler().list_instructions(item_id).await?;
    let body: Vec<InstructionSummaryResponse> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// GET /api/instructions/:id
pub async fn get_instruction(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let id = InstructionId::new(path_id(id, "id")?)?;
    let instruction = state.attachments_handler().get_instruction(id).await?;
    Ok(Json(InstructionResponse::from(instruction)))
}

/// POST /api/instructions
pub async fn add_instruction(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
    payload: Result<Json<CreateInstructionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let req = json_body(payload)?;
    let instruction = NewInstruction::new(req.item_id, &req.title, &req.body, req.image_url)?;

    let id = state.attachments_handler().add_instruction(instruction).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.as_i64() })))
}

fn required_item_id(
    params: Result<Query<ItemIdParams>, QueryRejection>,
) -> Result<ItemId, ValidationError> {
    let Query(params) = params.map_err(|e| ValidationError::rule(e.body_text()))?;
    match params.item_id {
        Some(id) => ItemId::new(id),
        None => Err(ValidationError::rule("item_id is required")),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for catalog errors.
#[derive(Debug)]
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for CatalogApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.0.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "catalog request failed");
        }
        error_response(status, code, self.0.message())
    }
}
