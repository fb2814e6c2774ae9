//! Row decoding shared by the PostgreSQL adapters.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::equipment::{
    EquipmentItem, EquipmentNote, Instruction, InstructionSummary, ItemProfile, Stock,
};
use crate::domain::foundation::{
    Actor, BorrowId, DomainError, InstructionId, ItemId, NoteId, Role, Timestamp, UserId,
};
use crate::domain::lending::{BorrowRecord, BorrowStatus};

pub(super) const ITEM_COLUMNS: &str = "id, sku, name, description, category, location, \
     quantity, available_quantity, unit_cost, supplier, date_purchased, status, image_url, \
     created_at";

pub(super) const RECORD_COLUMNS: &str = "id, item_id, user_id, quantity, borrow_date, \
     return_date, actual_return_date, condition_on_return, status";

pub(super) const USER_COLUMNS: &str = "id, username, full_name, email, role, password_hash";

/// Maps a driver error to a storage failure.
pub(super) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

pub(super) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    column::<DateTime<Utc>>(row, name).map(Timestamp::from_datetime)
}

fn optional_timestamp(row: &PgRow, name: &str) -> Result<Option<Timestamp>, DomainError> {
    Ok(column::<Option<DateTime<Utc>>>(row, name)?.map(Timestamp::from_datetime))
}

pub(super) fn row_to_item(row: &PgRow) -> Result<EquipmentItem, DomainError> {
    let quantity: i64 = column(row, "quantity")?;
    let available: i64 = column(row, "available_quantity")?;
    let stock = Stock::new(quantity, available)
        .map_err(|e| DomainError::database(format!("Corrupt stock row: {}", e)))?;

    Ok(EquipmentItem::reconstitute(
        ItemId::from_raw(column(row, "id")?),
        column(row, "sku")?,
        column(row, "name")?,
        ItemProfile {
            description: column(row, "description")?,
            category: column(row, "category")?,
            location: column(row, "location")?,
            unit_cost: column(row, "unit_cost")?,
            supplier: column(row, "supplier")?,
            date_purchased: optional_timestamp(row, "date_purchased")?,
            status: column(row, "status")?,
            image_url: column(row, "image_url")?,
        },
        stock,
        timestamp(row, "created_at")?,
    ))
}

pub(super) fn row_to_record(row: &PgRow) -> Result<BorrowRecord, DomainError> {
    let status: String = column(row, "status")?;
    let status: BorrowStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Corrupt borrow status: {}", e)))?;

    Ok(BorrowRecord {
        id: BorrowId::from_raw(column(row, "id")?),
        item_id: ItemId::from_raw(column(row, "item_id")?),
        user_id: UserId::from_raw(column(row, "user_id")?),
        quantity: column(row, "quantity")?,
        borrow_date: timestamp(row, "borrow_date")?,
        return_date: optional_timestamp(row, "return_date")?,
        actual_return_date: optional_timestamp(row, "actual_return_date")?,
        condition_on_return: column(row, "condition_on_return")?,
        status,
    })
}

pub(super) fn row_to_actor(row: &PgRow) -> Result<Actor, DomainError> {
    let role: String = column(row, "role")?;
    let role: Role = role
        .parse()
        .map_err(|e| DomainError::database(format!("Corrupt user role: {}", e)))?;
    let username: String = column(row, "username")?;
    let full_name: String = column(row, "full_name")?;
    let email: String = column(row, "email")?;

    Ok(Actor::new(
        UserId::from_raw(column(row, "id")?),
        username,
        full_name,
        email,
        role,
    ))
}

pub(super) fn password_hash(row: &PgRow) -> Result<String, DomainError> {
    column(row, "password_hash")
}

pub(super) fn row_to_note(row: &PgRow) -> Result<EquipmentNote, DomainError> {
    Ok(EquipmentNote {
        id: NoteId::from_raw(column(row, "id")?),
        item_id: ItemId::from_raw(column(row, "item_id")?),
        note_text: column(row, "note_text")?,
        created_by: column(row, "created_by")?,
        created_at: timestamp(row, "created_at")?,
    })
}

pub(super) fn row_to_instruction(row: &PgRow) -> Result<Instruction, DomainError> {
    Ok(Instruction {
        id: InstructionId::from_raw(column(row, "id")?),
        item_id: ItemId::from_raw(column(row, "item_id")?),
        title: column(row, "title")?,
        body: column(row, "body")?,
        image_url: column(row, "image_url")?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

pub(super) fn row_to_instruction_summary(row: &PgRow) -> Result<InstructionSummary, DomainError> {
    Ok(InstructionSummary {
        id: InstructionId::from_raw(column(row, "id")?),
        item_id: ItemId::from_raw(column(row, "item_id")?),
        title: column(row, "title")?,
        created_at: timestamp(row, "created_at")?,
    })
}
