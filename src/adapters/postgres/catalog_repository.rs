//! PostgreSQL implementations of the catalog and attachment repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::equipment::{
    EquipmentItem, EquipmentNote, Instruction, InstructionSummary, NewInstruction, NewItem,
    NewNote,
};
use crate::domain::foundation::{DomainError, ErrorCode, InstructionId, ItemId, NoteId};
use crate::ports::{AttachmentRepository, CatalogRepository, ItemQuery};

use super::rows::{
    db_error, is_unique_violation, row_to_instruction, row_to_instruction_summary, row_to_item,
    row_to_note, ITEM_COLUMNS,
};

#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<EquipmentItem>, DomainError> {
        let rows = match &query.search {
            Some(needle) => {
                let sql = format!(
                    "SELECT {} FROM equipment_items \
                     WHERE name ILIKE $1 OR sku ILIKE $1 OR category ILIKE $1 OR location ILIKE $1 \
                     ORDER BY id DESC LIMIT $2 OFFSET $3",
                    ITEM_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(format!("%{}%", escape_like(needle)))
                    .bind(i64::from(query.limit))
                    .bind(i64::from(query.offset))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM equipment_items ORDER BY id DESC LIMIT $1 OFFSET $2",
                    ITEM_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(i64::from(query.limit))
                    .bind(i64::from(query.offset))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_error("list items"))?;

        rows.iter().map(row_to_item).collect()
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<EquipmentItem>, DomainError> {
        let sql = format!("SELECT {} FROM equipment_items WHERE id = $1", ITEM_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch item"))?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn insert_item(&self, item: &NewItem) -> Result<EquipmentItem, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO equipment_items (
                sku, name, description, category, location, quantity, available_quantity,
                unit_cost, supplier, date_purchased, status, image_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );
        let profile = &item.profile;
        let row = sqlx::query(&sql)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&profile.description)
            .bind(&profile.category)
            .bind(&profile.location)
            .bind(item.stock.quantity())
            .bind(item.stock.available())
            .bind(profile.unit_cost)
            .bind(&profile.supplier)
            .bind(profile.date_purchased.as_ref().map(|d| *d.as_datetime()))
            .bind(&profile.status)
            .bind(profile.image_url.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::new(
                        ErrorCode::Conflict,
                        format!("duplicate sku: {}", item.sku),
                    )
                } else {
                    db_error("insert item")(e)
                }
            })?;

        row_to_item(&row)
    }

    async fn set_image_url(&self, id: ItemId, url: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE equipment_items SET image_url = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(url)
            .execute(&self.pool)
            .await
            .map_err(db_error("update item image"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AttachmentRepository for PostgresCatalogRepository {
    async fn list_notes(&self, item_id: ItemId) -> Result<Vec<EquipmentNote>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, note_text, created_by, created_at
            FROM equipment_notes
            WHERE item_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(item_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list notes"))?;

        rows.iter().map(row_to_note).collect()
    }

    async fn insert_note(&self, note: &NewNote) -> Result<NoteId, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO equipment_notes (item_id, note_text, created_by) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(note.item_id.as_i64())
        .bind(&note.note_text)
        .bind(note.created_by.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert note"))?;

        Ok(NoteId::from_raw(id))
    }

    async fn list_instructions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InstructionSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, title, created_at
            FROM equipment_instructions
            WHERE item_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(item_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list instructions"))?;

        rows.iter().map(row_to_instruction_summary).collect()
    }

    async fn find_instruction(
        &self,
        id: InstructionId,
    ) -> Result<Option<Instruction>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, title, body, image_url, created_at, updated_at
            FROM equipment_instructions
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch instruction"))?;

        row.as_ref().map(row_to_instruction).transpose()
    }

    async fn insert_instruction(
        &self,
        instruction: &NewInstruction,
    ) -> Result<InstructionId, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO equipment_instructions (item_id, title, body, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(instruction.item_id.as_i64())
        .bind(&instruction.title)
        .bind(&instruction.body)
        .bind(instruction.image_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert instruction"))?;

        Ok(InstructionId::from_raw(id))
    }
}

/// Escapes LIKE wildcards so search text matches literally.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("scope"), "scope");
    }
}
