//! HTTP handlers for lending endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::lending::{
    BorrowItemCommand, ListOpenBorrowsQuery, ReturnItemCommand,
};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::lending::{ItemRef, LendingError, ReturnSelector};

use super::super::error::{error_response, json_body, status_for};
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    BorrowRecordResponse, BorrowRequest, BorrowResponse, ReturnRequest, ReturnResponse,
};

/// POST /api/items/borrow
pub async fn borrow_item(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    payload: Result<Json<BorrowRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LendingApiError> {
    let req = json_body(payload)?;
    let cmd = BorrowItemCommand {
        actor,
        item: ItemRef::from_parts(req.item_id, req.sku.as_deref())?,
        quantity: req.quantity,
        return_date: Timestamp::parse_optional_date("return_date", req.return_date.as_deref())?,
    };

    let result = state.borrow_handler().handle(cmd).await?;

    let body = BorrowResponse {
        available_quantity: result.item.available_quantity(),
        record: result.record.into(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/items/return
pub async fn return_item(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    payload: Result<Json<ReturnRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LendingApiError> {
    let req = json_body(payload)?;
    let cmd = ReturnItemCommand {
        actor,
        selector: ReturnSelector::from_parts(req.borrow_id, req.item_id, req.sku.as_deref())?,
        quantity: req.quantity,
        condition: req.condition_on_return,
        returned_at: Timestamp::parse_optional_date("returned_at", req.returned_at.as_deref())?,
    };

    let result = state.return_handler().handle(cmd).await?;

    Ok(Json(ReturnResponse {
        status: "ok".to_string(),
        borrow_id: result.record.id,
        item_id: result.record.item_id,
        quantity: result.record.quantity,
        actual_return_date: result.record.actual_return_date,
        available_quantity: result.item.available_quantity(),
    }))
}

/// GET /api/items/open-borrows
pub async fn open_borrows(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<impl IntoResponse, LendingApiError> {
    let records = state
        .open_borrows_handler()
        .handle(ListOpenBorrowsQuery { user_id: actor.id })
        .await?;

    let body: Vec<BorrowRecordResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for lending errors.
#[derive(Debug)]
pub struct LendingApiError(LendingError);

impl From<LendingError> for LendingApiError {
    fn from(err: LendingError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for LendingApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for LendingApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.0.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "lending request failed");
        }
        error_response(status, code, self.0.to_string())
    }
}
