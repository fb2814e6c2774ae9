//! HTTP DTOs for the lending endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BorrowId, ItemId, Timestamp, UserId};
use crate::domain::lending::{BorrowRecord, BorrowStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/items/borrow`. `item_id` wins over `sku`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BorrowRequest {
    pub item_id: Option<i64>,
    pub sku: Option<String>,
    /// Missing means zero, which fails validation.
    #[serde(default)]
    pub quantity: i64,
    /// Expected return date, `YYYY-MM-DD`.
    pub return_date: Option<String>,
}

/// Body of `POST /api/items/return`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnRequest {
    pub borrow_id: Option<i64>,
    pub item_id: Option<i64>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub condition_on_return: Option<String>,
    /// `YYYY-MM-DD`; defaults to now.
    pub returned_at: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRecordResponse {
    pub id: BorrowId,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub borrow_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_on_return: Option<String>,
    pub status: BorrowStatus,
}

impl From<BorrowRecord> for BorrowRecordResponse {
    fn from(record: BorrowRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            item_id: record.item_id,
            quantity: record.quantity,
            borrow_date: record.borrow_date,
            return_date: record.return_date,
            actual_return_date: record.actual_return_date,
            condition_on_return: record.condition_on_return,
            status: record.status,
        }
    }
}

/// Response of a successful borrow: the new record plus remaining stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowResponse {
    #[serde(flatten)]
    pub record: BorrowRecordResponse,
    pub available_quantity: i64,
}

/// Response of a successful return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnResponse {
    /// Always `"ok"`.
    pub status: String,
    pub borrow_id: BorrowId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub actual_return_date: Option<Timestamp>,
    pub available_quantity: i64,
}
