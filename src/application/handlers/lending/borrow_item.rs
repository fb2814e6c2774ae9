//! BorrowItemHandler - Command handler for lending units of an item.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::equipment::EquipmentItem;
use crate::domain::foundation::{Actor, Timestamp};
use crate::domain::lending::{ActivityEntry, BorrowRecord, ItemRef, LendingError, NewBorrowRecord};
use crate::ports::LendingStore;

use super::ItemLedger;

/// Command to borrow units of an item.
#[derive(Debug, Clone)]
pub struct BorrowItemCommand {
    pub actor: Actor,
    pub item: ItemRef,
    pub quantity: i64,
    /// Expected return date.
    pub return_date: Option<Timestamp>,
}

/// Result of a successful borrow.
#[derive(Debug, Clone)]
pub struct BorrowItemResult {
    pub record: BorrowRecord,
    /// Item state right after the reservation.
    pub item: EquipmentItem,
}

/// Handler for borrowing items.
///
/// Lock, reserve, record and audit run in one transaction; any failure
/// before commit leaves stock and records untouched.
pub struct BorrowItemHandler {
    store: Arc<dyn LendingStore>,
}

impl BorrowItemHandler {
    pub fn new(store: Arc<dyn LendingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: BorrowItemCommand) -> Result<BorrowItemResult, LendingError> {
        if cmd.quantity <= 0 {
            return Err(LendingError::validation("quantity must be > 0"));
        }

        let mut tx = self.store.begin().await?;

        // 1. Lock the item and reserve stock
        let item = ItemLedger::try_reserve(tx.as_mut(), &cmd.item, cmd.quantity).await?;

        // 2. Record the loan
        let record = tx
            .insert_record(&NewBorrowRecord {
                item_id: item.id(),
                user_id: cmd.actor.id,
                quantity: cmd.quantity,
                borrow_date: Timestamp::now(),
                return_date: cmd.return_date,
            })
            .await?;

        // 3. Audit (best-effort)
        let entry = ActivityEntry::borrowed(cmd.actor.id, item.name(), item.sku(), cmd.quantity);
        if let Err(err) = tx.append_activity(&entry).await {
            warn!(
                borrow_id = %record.id,
                user_id = %cmd.actor.id,
                error = %err,
                "failed to write borrow activity"
            );
        }

        // 4. Commit
        tx.commit().await?;

        info!(
            borrow_id = %record.id,
            item_id = %item.id(),
            user_id = %cmd.actor.id,
            quantity = cmd.quantity,
            available = item.available_quantity(),
            "item borrowed"
        );

        Ok(BorrowItemResult { record, item })
    }
}
