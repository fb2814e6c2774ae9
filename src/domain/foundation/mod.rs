//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the lending domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{Actor, AuthError, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BorrowId, InstructionId, ItemId, NoteId, UserId};
pub use timestamp::{Timestamp, DATE_FORMAT};
