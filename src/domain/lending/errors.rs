//! Lending-specific error types.

use thiserror::Error;

use crate::domain::equipment::StockError;
use crate::domain::foundation::{BorrowId, DomainError, ErrorCode, ValidationError};

use super::ItemRef;

/// Errors surfaced by borrow and return.
///
/// Every variant maps to a stable [`ErrorCode`] so callers can react
/// without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    #[error("{0}")]
    Validation(String),

    #[error("item not found: {0}")]
    ItemNotFound(ItemRef),

    #[error("open borrow not found")]
    BorrowNotFound,

    #[error("not enough stock: available={available}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("borrow {0} has already been returned")]
    AlreadyReturned(BorrowId),

    #[error("multiple open borrows ({matches}); specify borrow_id")]
    AmbiguousSelection { matches: usize },

    #[error("partial returns not supported (borrowed {borrowed}, got {requested}); send the full quantity")]
    PartialReturnUnsupported { borrowed: i64, requested: i64 },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl LendingError {
    pub fn validation(message: impl Into<String>) -> Self {
        LendingError::Validation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LendingError::Validation(_) => ErrorCode::ValidationFailed,
            LendingError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            LendingError::BorrowNotFound => ErrorCode::BorrowNotFound,
            LendingError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            LendingError::AlreadyReturned(_) => ErrorCode::AlreadyReturned,
            LendingError::AmbiguousSelection { .. } => ErrorCode::AmbiguousSelection,
            LendingError::PartialReturnUnsupported { .. } => ErrorCode::PartialReturnUnsupported,
            LendingError::Internal(_) => ErrorCode::InternalError,
            LendingError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for LendingError {
    fn from(err: ValidationError) -> Self {
        LendingError::Validation(err.to_string())
    }
}

impl From<DomainError> for LendingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => LendingError::Validation(err.message),
            ErrorCode::InternalError => LendingError::Internal(err.message),
            _ => LendingError::Storage(err.to_string()),
        }
    }
}

impl From<StockError> for LendingError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Insufficient {
                available,
                requested,
            } => LendingError::InsufficientStock {
                available,
                requested,
            },
            StockError::NonPositive(_) => LendingError::validation("quantity must be > 0"),
            other => LendingError::Internal(other.to_string()),
        }
    }
}
