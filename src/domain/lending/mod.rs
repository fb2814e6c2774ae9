//! Lending domain module.
//!
//! Borrow records, the selectors that locate them, and the errors the
//! borrow and return operations surface.

mod activity;
mod errors;
mod record;
mod selector;
mod status;

pub use activity::ActivityEntry;
pub use errors::LendingError;
pub use record::{BorrowRecord, NewBorrowRecord, RecordClosure};
pub use selector::{ItemRef, ReturnSelector};
pub use status::BorrowStatus;
