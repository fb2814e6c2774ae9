//! Lending store port - transactional access to stock and borrow records.
//!
//! Borrow and return each run inside one [`LendingTransaction`]. The
//! transaction owns the item-scoped exclusive lock taken by
//! [`LendingTransaction::lock_item`] until it is committed or dropped.
//!
//! # Contract
//!
//! - Dropping a transaction without calling `commit` rolls back every
//!   write made through it and releases its locks
//! - `lock_item` blocks while another transaction holds the same item
//! - `close_record` only closes a record that is still open and reports
//!   whether it did
//! - A failed `append_activity` leaves the rest of the transaction usable

use async_trait::async_trait;

use crate::domain::equipment::{EquipmentItem, Stock};
use crate::domain::foundation::{BorrowId, DomainError, ItemId, UserId};
use crate::domain::lending::{
    ActivityEntry, BorrowRecord, ItemRef, NewBorrowRecord, RecordClosure, ReturnSelector,
};

/// Entry point for lending units of work.
#[async_trait]
pub trait LendingStore: Send + Sync {
    /// Opens a new transaction.
    async fn begin(&self) -> Result<Box<dyn LendingTransaction>, DomainError>;

    /// Lists a user's open borrow records, newest first. Not transactional.
    async fn open_borrows(&self, user_id: UserId) -> Result<Vec<BorrowRecord>, DomainError>;
}

/// One atomic unit of lending work.
#[async_trait]
pub trait LendingTransaction: Send {
    /// Takes the exclusive lock on an item and returns its current state.
    ///
    /// Returns `Ok(None)` if no item matches.
    async fn lock_item(&mut self, item: &ItemRef) -> Result<Option<EquipmentItem>, DomainError>;

    /// Writes new stock counters for an item locked by this transaction.
    async fn write_stock(&mut self, item_id: ItemId, stock: Stock) -> Result<(), DomainError>;

    /// Inserts an open borrow record.
    async fn insert_record(&mut self, record: &NewBorrowRecord)
        -> Result<BorrowRecord, DomainError>;

    /// Lists the user's open records matching the selector.
    ///
    /// A `BorrowId` selector matches at most one record, and only if it
    /// belongs to `user_id`.
    async fn find_open_records(
        &mut self,
        user_id: UserId,
        selector: &ReturnSelector,
    ) -> Result<Vec<BorrowRecord>, DomainError>;

    /// Loads one of the user's records whether open or closed.
    ///
    /// Returns `Ok(None)` if the id is unknown or belongs to someone else.
    async fn find_record(
        &mut self,
        user_id: UserId,
        id: BorrowId,
    ) -> Result<Option<BorrowRecord>, DomainError>;

    /// Closes a record if it is still open.
    ///
    /// Returns `Ok(false)` when the record was already closed.
    async fn close_record(
        &mut self,
        id: BorrowId,
        closure: &RecordClosure,
    ) -> Result<bool, DomainError>;

    /// Appends an audit entry.
    async fn append_activity(&mut self, entry: &ActivityEntry) -> Result<(), DomainError>;

    /// Makes every write durable and releases the locks.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
