//! ReturnItemHandler - Command handler for closing a borrow.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::equipment::EquipmentItem;
use crate::domain::foundation::{Actor, Timestamp};
use crate::domain::lending::{
    ActivityEntry, BorrowRecord, ItemRef, LendingError, RecordClosure, ReturnSelector,
};
use crate::ports::{LendingStore, LendingTransaction};

use super::ItemLedger;

/// Command to return a borrow in full.
#[derive(Debug, Clone)]
pub struct ReturnItemCommand {
    pub actor: Actor,
    pub selector: ReturnSelector,
    /// If given, must equal the borrowed quantity.
    pub quantity: Option<i64>,
    pub condition: Option<String>,
    /// Defaults to now.
    pub returned_at: Option<Timestamp>,
}

/// Result of a successful return.
#[derive(Debug, Clone)]
pub struct ReturnItemResult {
    /// The record, now closed.
    pub record: BorrowRecord,
    /// Item state right after the release.
    pub item: EquipmentItem,
}

/// Handler for returning items.
///
/// The close is guarded on the record still being open, so of two
/// concurrent returns of one record exactly one restores stock.
pub struct ReturnItemHandler {
    store: Arc<dyn LendingStore>,
}

impl ReturnItemHandler {
    pub fn new(store: Arc<dyn LendingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ReturnItemCommand) -> Result<ReturnItemResult, LendingError> {
        let mut tx = self.store.begin().await?;

        // 1. Locate the actor's open record
        let mut matches = tx.find_open_records(cmd.actor.id, &cmd.selector).await?;
        let mut record = match matches.len() {
            0 => return Err(Self::no_open_record(tx.as_mut(), &cmd).await),
            1 => matches.remove(0),
            n => return Err(LendingError::AmbiguousSelection { matches: n }),
        };

        if let Some(requested) = cmd.quantity {
            if requested != record.quantity {
                return Err(LendingError::PartialReturnUnsupported {
                    borrowed: record.quantity,
                    requested,
                });
            }
        }

        // 2. Lock the item
        let mut item = ItemLedger::lock(tx.as_mut(), &ItemRef::Id(record.item_id)).await?;

        // 3. Close the record if nobody beat us to it
        let closure = RecordClosure::new(
            cmd.returned_at.unwrap_or_else(Timestamp::now),
            cmd.condition,
        );
        if !tx.close_record(record.id, &closure).await? {
            return Err(LendingError::AlreadyReturned(record.id));
        }
        record.close(&closure)?;

        // 4. Restore stock
        ItemLedger::release(tx.as_mut(), &mut item, record.quantity).await?;

        // 5. Audit (best-effort)
        let entry = ActivityEntry::returned(cmd.actor.id, item.name(), item.sku(), record.quantity);
        if let Err(err) = tx.append_activity(&entry).await {
            warn!(
                borrow_id = %record.id,
                user_id = %cmd.actor.id,
                error = %err,
                "failed to write return activity"
            );
        }

        // 6. Commit
        tx.commit().await?;

        info!(
            borrow_id = %record.id,
            item_id = %item.id(),
            user_id = %cmd.actor.id,
            quantity = record.quantity,
            available = item.available_quantity(),
            "item returned"
        );

        Ok(ReturnItemResult { record, item })
    }

    /// Tells an already-closed record apart from one that never existed.
    async fn no_open_record(
        tx: &mut dyn LendingTransaction,
        cmd: &ReturnItemCommand,
    ) -> LendingError {
        let ReturnSelector::BorrowId(id) = &cmd.selector else {
            return LendingError::BorrowNotFound;
        };
        match tx.find_record(cmd.actor.id, *id).await {
            Ok(Some(record)) if !record.is_open() => LendingError::AlreadyReturned(record.id),
            Ok(_) => LendingError::BorrowNotFound,
            Err(err) => err.into(),
        }
    }
}
