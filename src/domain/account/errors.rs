//! Registration error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Validation(String),

    #[error("email or username already exists")]
    Conflict,

    #[error("storage failure: {0}")]
    Storage(String),
}

impl RegistrationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::Validation(_) => ErrorCode::ValidationFailed,
            RegistrationError::Conflict => ErrorCode::Conflict,
            RegistrationError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        RegistrationError::Validation(err.to_string())
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => RegistrationError::Conflict,
            ErrorCode::ValidationFailed => RegistrationError::Validation(err.message),
            _ => RegistrationError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_domain_error_becomes_conflict() {
        let err: RegistrationError =
            DomainError::new(ErrorCode::Conflict, "duplicate key").into();
        assert_eq!(err, RegistrationError::Conflict);
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn other_domain_errors_are_storage() {
        let err: RegistrationError = DomainError::database("pool closed").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
