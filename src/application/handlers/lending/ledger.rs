//! ItemLedger - bounded stock mutation inside a lending transaction.
//!
//! Every change to `available_quantity` made by borrow and return goes
//! through here. The item lock is taken by [`ItemLedger::lock`] and held by
//! the transaction until commit or rollback, so the check and the write
//! below can never interleave with another actor's.

use tracing::error;

use crate::domain::equipment::{EquipmentItem, StockError};
use crate::domain::lending::{ItemRef, LendingError};
use crate::ports::LendingTransaction;

pub struct ItemLedger;

impl ItemLedger {
    /// Locks an item for the rest of the transaction.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if nothing matches `item`
    pub async fn lock(
        tx: &mut dyn LendingTransaction,
        item: &ItemRef,
    ) -> Result<EquipmentItem, LendingError> {
        tx.lock_item(item)
            .await?
            .ok_or_else(|| LendingError::ItemNotFound(item.clone()))
    }

    /// Locks an item and takes `qty` units out of its available pool.
    ///
    /// Returns the item as it stands after the reservation.
    pub async fn try_reserve(
        tx: &mut dyn LendingTransaction,
        item: &ItemRef,
        qty: i64,
    ) -> Result<EquipmentItem, LendingError> {
        let mut locked = Self::lock(tx, item).await?;
        locked.reserve(qty)?;
        tx.write_stock(locked.id(), locked.stock()).await?;
        Ok(locked)
    }

    /// Puts `qty` units back on an item already locked by `tx`.
    ///
    /// Releasing past the physical quantity means the books are already
    /// wrong; it is logged and surfaced as an internal failure so the
    /// caller rolls back.
    pub async fn release(
        tx: &mut dyn LendingTransaction,
        item: &mut EquipmentItem,
        qty: i64,
    ) -> Result<(), LendingError> {
        if let Err(err) = item.release(qty) {
            if let StockError::OverRelease { .. } = err {
                error!(
                    item_id = %item.id(),
                    quantity = item.quantity(),
                    available = item.available_quantity(),
                    released = qty,
                    "release would exceed item quantity"
                );
            }
            return Err(err.into());
        }
        tx.write_stock(item.id(), item.stock()).await?;
        Ok(())
    }
}
