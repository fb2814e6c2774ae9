//! Catalog-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, InstructionId, ItemId, ValidationError};

/// Errors raised by catalog reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Input failed a catalog rule.
    Validation(String),
    /// No item with this id.
    ItemNotFound(ItemId),
    /// No instruction with this id.
    InstructionNotFound(InstructionId),
    /// Another item already uses this SKU.
    DuplicateSku(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Validation(_) => ErrorCode::ValidationFailed,
            CatalogError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            CatalogError::InstructionNotFound(_) => ErrorCode::NotFound,
            CatalogError::DuplicateSku(_) => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::Validation(msg) => msg.clone(),
            CatalogError::ItemNotFound(id) => format!("item not found: {}", id),
            CatalogError::InstructionNotFound(id) => format!("instruction not found: {}", id),
            CatalogError::DuplicateSku(sku) => format!("duplicate sku: {}", sku),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CatalogError::Validation(err.message),
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_sku_is_a_validation_failure() {
        let err = CatalogError::DuplicateSku("OSC-01".into());
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.to_string(), "duplicate sku: OSC-01");
    }

    #[test]
    fn domain_error_maps_to_infrastructure() {
        let err: CatalogError = DomainError::database("connection reset").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn item_not_found_has_stable_code() {
        let err = CatalogError::ItemNotFound(ItemId::from_raw(8));
        assert_eq!(err.code(), ErrorCode::ItemNotFound);
        assert_eq!(err.to_string(), "item not found: 8");
    }
}
