//! In-memory lending transactions.
//!
//! Each item has its own `tokio::sync::Mutex<()>`. A transaction holds the
//! owned guard of every item it locked, stages its writes locally and
//! applies them to the shared state in one step on commit, before the
//! guards are released. Dropping the transaction discards the staged
//! writes, which gives rollback on error and on task cancellation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::equipment::{EquipmentItem, Stock};
use crate::domain::foundation::{BorrowId, DomainError, ErrorCode, ItemId, UserId};
use crate::domain::lending::{
    ActivityEntry, BorrowRecord, ItemRef, NewBorrowRecord, RecordClosure, ReturnSelector,
};
use crate::ports::{LendingStore, LendingTransaction};

use super::database::{InMemoryDatabase, LockRegistry, Sequences, State};

#[async_trait]
impl LendingStore for InMemoryDatabase {
    async fn begin(&self) -> Result<Box<dyn LendingTransaction>, DomainError> {
        Ok(Box::new(InMemoryTransaction {
            state: Arc::clone(&self.state),
            locks: Arc::clone(&self.locks),
            sequences: Arc::clone(&self.sequences),
            fail_activity: Arc::clone(&self.fail_activity),
            guards: HashMap::new(),
            stock: HashMap::new(),
            inserted: Vec::new(),
            closed: HashMap::new(),
            activity: Vec::new(),
        }))
    }

    async fn open_borrows(&self, user_id: UserId) -> Result<Vec<BorrowRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .rev()
            .filter(|r| r.user_id == user_id && r.is_open())
            .cloned()
            .collect())
    }
}

/// A unit of lending work against [`InMemoryDatabase`].
pub struct InMemoryTransaction {
    state: Arc<RwLock<State>>,
    locks: Arc<LockRegistry>,
    sequences: Arc<Sequences>,
    fail_activity: Arc<AtomicBool>,
    guards: HashMap<ItemId, OwnedMutexGuard<()>>,
    stock: HashMap<ItemId, Stock>,
    inserted: Vec<BorrowRecord>,
    closed: HashMap<BorrowId, RecordClosure>,
    activity: Vec<ActivityEntry>,
}

impl InMemoryTransaction {
    async fn acquire(&mut self, id: ItemId) {
        if self.guards.contains_key(&id) {
            return;
        }
        let lock = {
            let mut registry = self.locks.lock().await;
            Arc::clone(registry.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))))
        };
        let guard = lock.lock_owned().await;
        self.guards.insert(id, guard);
    }

    fn matches(
        state: &State,
        record: &BorrowRecord,
        user_id: UserId,
        selector: &ReturnSelector,
    ) -> bool {
        if record.user_id != user_id || !record.is_open() {
            return false;
        }
        match selector {
            ReturnSelector::BorrowId(id) => record.id == *id,
            ReturnSelector::Item(ItemRef::Id(item_id)) => record.item_id == *item_id,
            ReturnSelector::Item(ItemRef::Sku(sku)) => state
                .items
                .get(&record.item_id)
                .is_some_and(|item| item.sku() == sku),
        }
    }
}

#[async_trait]
impl LendingTransaction for InMemoryTransaction {
    async fn lock_item(&mut self, item: &ItemRef) -> Result<Option<EquipmentItem>, DomainError> {
        let id = match self.state.read().await.resolve_item(item) {
            Some(found) => found.id(),
            None => return Ok(None),
        };
        self.acquire(id).await;

        // Re-read after the lock: another transaction may have committed
        // while we waited.
        let mut current = match self.state.read().await.items.get(&id) {
            Some(found) => found.clone(),
            None => return Ok(None),
        };
        if let Some(stock) = self.stock.get(&id) {
            current.apply_stock(*stock);
        }
        Ok(Some(current))
    }

    async fn write_stock(&mut self, item_id: ItemId, stock: Stock) -> Result<(), DomainError> {
        if !self.guards.contains_key(&item_id) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("stock write on unlocked item {}", item_id),
            ));
        }
        self.stock.insert(item_id, stock);
        Ok(())
    }

    async fn insert_record(
        &mut self,
        record: &NewBorrowRecord,
    ) -> Result<BorrowRecord, DomainError> {
        let created = BorrowRecord::open(self.sequences.next_borrow(), record.clone());
        self.inserted.push(created.clone());
        Ok(created)
    }

    async fn find_open_records(
        &mut self,
        user_id: UserId,
        selector: &ReturnSelector,
    ) -> Result<Vec<BorrowRecord>, DomainError> {
        let state = self.state.read().await;
        let mut found: Vec<BorrowRecord> = state
            .records
            .values()
            .chain(self.inserted.iter())
            .filter(|r| !self.closed.contains_key(&r.id))
            .filter(|r| Self::matches(&state, r, user_id, selector))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }

    async fn find_record(
        &mut self,
        user_id: UserId,
        id: BorrowId,
    ) -> Result<Option<BorrowRecord>, DomainError> {
        let state = self.state.read().await;
        let mut record = match self
            .inserted
            .iter()
            .chain(state.records.values())
            .find(|r| r.id == id && r.user_id == user_id)
        {
            Some(found) => found.clone(),
            None => return Ok(None),
        };
        if let Some(closure) = self.closed.get(&id) {
            let _ = record.close(closure);
        }
        Ok(Some(record))
    }

    async fn close_record(
        &mut self,
        id: BorrowId,
        closure: &RecordClosure,
    ) -> Result<bool, DomainError> {
        if self.closed.contains_key(&id) {
            return Ok(false);
        }
        if let Some(own) = self.inserted.iter_mut().find(|r| r.id == id) {
            return Ok(own.close(closure).is_ok());
        }
        let open = self
            .state
            .read()
            .await
            .records
            .get(&id)
            .is_some_and(BorrowRecord::is_open);
        if open {
            self.closed.insert(id, closure.clone());
        }
        Ok(open)
    }

    async fn append_activity(&mut self, entry: &ActivityEntry) -> Result<(), DomainError> {
        if self.fail_activity.load(Ordering::SeqCst) {
            return Err(DomainError::database("activity log unavailable"));
        }
        self.activity.push(entry.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let tx = *self;
        let mut state = tx.state.write().await;

        for (item_id, stock) in tx.stock {
            match state.items.get_mut(&item_id) {
                Some(item) => item.apply_stock(stock),
                None => {
                    return Err(DomainError::database(format!(
                        "item {} vanished before commit",
                        item_id
                    )))
                }
            }
        }
        for record in tx.inserted {
            state.records.insert(record.id, record);
        }
        for (id, closure) in tx.closed {
            if let Some(record) = state.records.get_mut(&id) {
                record.close(&closure).map_err(|e| DomainError::database(e.to_string()))?;
            }
        }
        state.activity.extend(tx.activity);

        drop(state);
        drop(tx.guards);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use std::time::Duration;

    fn borrow_of(item: ItemId, qty: i64) -> NewBorrowRecord {
        NewBorrowRecord {
            item_id: item,
            user_id: UserId::from_raw(1),
            quantity: qty,
            borrow_date: Timestamp::now(),
            return_date: None,
        }
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let db = InMemoryDatabase::new();
        let item = db.seed_item("T-1", "Tripod", Stock::full(3).unwrap()).await;

        let mut tx = db.begin().await.unwrap();
        let mut locked = tx.lock_item(&ItemRef::Id(item.id())).await.unwrap().unwrap();
        locked.reserve(2).unwrap();
        tx.write_stock(item.id(), locked.stock()).await.unwrap();
        tx.insert_record(&borrow_of(item.id(), 2)).await.unwrap();
        drop(tx);

        assert_eq!(db.stock_of(&ItemRef::Id(item.id())).await.unwrap().available(), 3);
        assert!(db.records().await.is_empty());
    }

    #[tokio::test]
    async fn commit_applies_staged_writes() {
        let db = InMemoryDatabase::new();
        let item = db.seed_item("T-1", "Tripod", Stock::full(3).unwrap()).await;

        let mut tx = db.begin().await.unwrap();
        let mut locked = tx.lock_item(&ItemRef::Sku("T-1".into())).await.unwrap().unwrap();
        locked.reserve(1).unwrap();
        tx.write_stock(item.id(), locked.stock()).await.unwrap();
        tx.insert_record(&borrow_of(item.id(), 1)).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.stock_of(&ItemRef::Id(item.id())).await.unwrap().available(), 2);
        assert_eq!(db.records().await.len(), 1);
    }

    #[tokio::test]
    async fn lock_item_waits_for_the_holder() {
        let db = Arc::new(InMemoryDatabase::new());
        let id = db.seed_item("T-1", "Tripod", Stock::full(1).unwrap()).await.id();

        let mut first = db.begin().await.unwrap();
        first.lock_item(&ItemRef::Id(id)).await.unwrap();

        let contender = {
            let db = Arc::clone(&db);
            tokio::spawn(async move {
                let mut second = db.begin().await.unwrap();
                second.lock_item(&ItemRef::Id(id)).await.unwrap()
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        first.write_stock(id, Stock::new(1, 0).unwrap()).await.unwrap();
        first.commit().await.unwrap();

        let seen = contender.await.unwrap().unwrap();
        assert_eq!(seen.available_quantity(), 0);
    }

    #[tokio::test]
    async fn write_stock_requires_the_lock() {
        let db = InMemoryDatabase::new();
        let item = db.seed_item("T-1", "Tripod", Stock::full(1).unwrap()).await;
        let mut tx = db.begin().await.unwrap();
        assert!(tx.write_stock(item.id(), Stock::full(1).unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn find_record_sees_staged_close_and_owner() {
        let db = InMemoryDatabase::new();
        let item = db.seed_item("T-1", "Tripod", Stock::full(2).unwrap()).await;
        let mut tx = db.begin().await.unwrap();
        let record = tx.insert_record(&borrow_of(item.id(), 1)).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = db.begin().await.unwrap();
        let closure = RecordClosure::new(Timestamp::now(), None);
        assert!(tx.close_record(record.id, &closure).await.unwrap());

        let found = tx.find_record(UserId::from_raw(1), record.id).await.unwrap().unwrap();
        assert!(!found.is_open());
        assert!(tx.find_record(UserId::from_raw(2), record.id).await.unwrap().is_none());
        assert!(tx
            .find_record(UserId::from_raw(1), BorrowId::from_raw(999))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn lock_unknown_item_is_none() {
        let db = InMemoryDatabase::new();
        let mut tx = db.begin().await.unwrap();
        assert!(tx.lock_item(&ItemRef::Sku("nope".into())).await.unwrap().is_none());
    }
}
