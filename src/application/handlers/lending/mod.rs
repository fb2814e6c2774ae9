//! Lending handlers: borrow, return, and open-borrow listing.
//!
//! Borrow and return share the [`ItemLedger`] for every stock change.

mod borrow_item;
mod ledger;
mod list_open_borrows;
mod return_item;

pub use borrow_item::{BorrowItemCommand, BorrowItemHandler, BorrowItemResult};
pub use ledger::ItemLedger;
pub use list_open_borrows::{ListOpenBorrowsHandler, ListOpenBorrowsQuery};
pub use return_item::{ReturnItemCommand, ReturnItemHandler, ReturnItemResult};
