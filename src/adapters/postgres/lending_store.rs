//! PostgreSQL implementation of the lending store.
//!
//! Item exclusion is a row lock: `SELECT … FOR UPDATE` on the item row,
//! held until the enclosing transaction commits or rolls back. Audit
//! writes run inside a savepoint so a failed insert can be undone without
//! poisoning the outer transaction.

use async_trait::async_trait;
use sqlx::{Acquire, PgPool, Postgres, Transaction};

use crate::domain::equipment::{EquipmentItem, Stock};
use crate::domain::foundation::{BorrowId, DomainError, ItemId, UserId};
use crate::domain::lending::{
    ActivityEntry, BorrowRecord, BorrowStatus, ItemRef, NewBorrowRecord, RecordClosure,
    ReturnSelector,
};
use crate::ports::{LendingStore, LendingTransaction};

use super::rows::{db_error, row_to_item, row_to_record, ITEM_COLUMNS, RECORD_COLUMNS};

#[derive(Clone)]
pub struct PostgresLendingStore {
    pool: PgPool,
}

impl PostgresLendingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LendingStore for PostgresLendingStore {
    async fn begin(&self) -> Result<Box<dyn LendingTransaction>, DomainError> {
        let tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;
        Ok(Box::new(PostgresLendingTransaction { tx }))
    }

    async fn open_borrows(&self, user_id: UserId) -> Result<Vec<BorrowRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM borrow_records \
             WHERE user_id = $1 AND actual_return_date IS NULL AND status = 'borrowed' \
             ORDER BY id DESC",
            RECORD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("fetch open borrows"))?;

        rows.iter().map(row_to_record).collect()
    }
}

enum SelectorKey<'a> {
    Id(i64),
    Sku(&'a str),
}

/// A lending unit of work on one pooled connection.
pub struct PostgresLendingTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LendingTransaction for PostgresLendingTransaction {
    async fn lock_item(&mut self, item: &ItemRef) -> Result<Option<EquipmentItem>, DomainError> {
        let row = match item {
            ItemRef::Id(id) => {
                let sql = format!(
                    "SELECT {} FROM equipment_items WHERE id = $1 FOR UPDATE",
                    ITEM_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(id.as_i64())
                    .fetch_optional(&mut *self.tx)
                    .await
            }
            ItemRef::Sku(sku) => {
                let sql = format!(
                    "SELECT {} FROM equipment_items WHERE sku = $1 FOR UPDATE",
                    ITEM_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(sku)
                    .fetch_optional(&mut *self.tx)
                    .await
            }
        }
        .map_err(db_error("lock item"))?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn write_stock(&mut self, item_id: ItemId, stock: Stock) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE equipment_items
            SET quantity = $2, available_quantity = $3
            WHERE id = $1
            "#,
        )
        .bind(item_id.as_i64())
        .bind(stock.quantity())
        .bind(stock.available())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update stock"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::database(format!(
                "Item {} vanished during stock update",
                item_id
            )));
        }
        Ok(())
    }

    async fn insert_record(
        &mut self,
        record: &NewBorrowRecord,
    ) -> Result<BorrowRecord, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO borrow_records (item_id, user_id, quantity, borrow_date, return_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.item_id.as_i64())
        .bind(record.user_id.as_i64())
        .bind(record.quantity)
        .bind(record.borrow_date.as_datetime())
        .bind(record.return_date.as_ref().map(|d| *d.as_datetime()))
        .bind(BorrowStatus::Borrowed.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("insert borrow record"))?;

        Ok(BorrowRecord::open(BorrowId::from_raw(id), record.clone()))
    }

    async fn find_open_records(
        &mut self,
        user_id: UserId,
        selector: &ReturnSelector,
    ) -> Result<Vec<BorrowRecord>, DomainError> {
        let (filter, key) = match selector {
            ReturnSelector::BorrowId(id) => ("b.id = $2", SelectorKey::Id(id.as_i64())),
            ReturnSelector::Item(ItemRef::Id(item_id)) => {
                ("b.item_id = $2", SelectorKey::Id(item_id.as_i64()))
            }
            ReturnSelector::Item(ItemRef::Sku(sku)) => ("i.sku = $2", SelectorKey::Sku(sku)),
        };
        let columns = RECORD_COLUMNS
            .split(", ")
            .map(|c| format!("b.{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM borrow_records b \
             JOIN equipment_items i ON i.id = b.item_id \
             WHERE b.user_id = $1 AND b.actual_return_date IS NULL AND b.status = 'borrowed' \
             AND {} ORDER BY b.id DESC",
            columns, filter
        );

        let query = sqlx::query(&sql).bind(user_id.as_i64());
        let query = match key {
            SelectorKey::Id(id) => query.bind(id),
            SelectorKey::Sku(sku) => query.bind(sku),
        };

        let rows = query
            .fetch_all(&mut *self.tx)
            .await
            .map_err(db_error("find open borrow records"))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn find_record(
        &mut self,
        user_id: UserId,
        id: BorrowId,
    ) -> Result<Option<BorrowRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM borrow_records WHERE id = $1 AND user_id = $2",
            RECORD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .bind(user_id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("find borrow record"))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn close_record(
        &mut self,
        id: BorrowId,
        closure: &RecordClosure,
    ) -> Result<bool, DomainError> {
        // The IS NULL guard makes a lost race visible as zero rows.
        let result = sqlx::query(
            r#"
            UPDATE borrow_records
            SET actual_return_date = $2, condition_on_return = $3, status = $4
            WHERE id = $1 AND actual_return_date IS NULL AND status = 'borrowed'
            "#,
        )
        .bind(id.as_i64())
        .bind(closure.returned_at.as_datetime())
        .bind(closure.condition.as_deref())
        .bind(BorrowStatus::Returned.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("close borrow record"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn append_activity(&mut self, entry: &ActivityEntry) -> Result<(), DomainError> {
        let mut savepoint = self.tx.begin().await.map_err(db_error("open savepoint"))?;

        let inserted = sqlx::query(
            "INSERT INTO activity_logs (user_id, action, created_at) VALUES ($1, $2, $3)",
        )
        .bind(entry.user_id.as_i64())
        .bind(&entry.action)
        .bind(entry.at.as_datetime())
        .execute(&mut *savepoint)
        .await;

        match inserted {
            Ok(_) => savepoint.commit().await.map_err(db_error("release savepoint")),
            Err(e) => {
                savepoint
                    .rollback()
                    .await
                    .map_err(db_error("roll back savepoint"))?;
                Err(db_error("append activity")(e))
            }
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(db_error("commit transaction"))
    }
}
