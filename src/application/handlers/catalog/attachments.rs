//! Handlers for notes and instructions attached to items.

use std::sync::Arc;

use crate::domain::equipment::{
    CatalogError, EquipmentNote, Instruction, InstructionSummary, NewInstruction, NewNote,
};
use crate::domain::foundation::{InstructionId, ItemId, NoteId};
use crate::ports::{AttachmentRepository, CatalogRepository};

/// Reads and writes item notes and instructions.
///
/// Writes check that the target item exists first.
pub struct AttachmentsHandler {
    catalog: Arc<dyn CatalogRepository>,
    attachments: Arc<dyn AttachmentRepository>,
}

impl AttachmentsHandler {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        attachments: Arc<dyn AttachmentRepository>,
    ) -> Self {
        Self {
            catalog,
            attachments,
        }
    }

    pub async fn list_notes(&self, item_id: ItemId) -> Result<Vec<EquipmentNote>, CatalogError> {
        Ok(self.attachments.list_notes(item_id).await?)
    }

    pub async fn add_note(&self, note: NewNote) -> Result<NoteId, CatalogError> {
        self.require_item(note.item_id).await?;
        Ok(self.attachments.insert_note(&note).await?)
    }

    pub async fn list_instructions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InstructionSummary>, CatalogError> {
        Ok(self.attachments.list_instructions(item_id).await?)
    }

    pub async fn get_instruction(&self, id: InstructionId) -> Result<Instruction, CatalogError> {
        self.attachments
            .find_instruction(id)
            .await?
            .ok_or(CatalogError::InstructionNotFound(id))
    }

    pub async fn add_instruction(
        &self,
        instruction: NewInstruction,
    ) -> Result<InstructionId, CatalogError> {
        self.require_item(instruction.item_id).await?;
        Ok(self.attachments.insert_instruction(&instruction).await?)
    }

    async fn require_item(&self, item_id: ItemId) -> Result<(), CatalogError> {
        match self.catalog.find_item(item_id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::ItemNotFound(item_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::equipment::Stock;

    async fn setup() -> (AttachmentsHandler, ItemId) {
        let db = Arc::new(InMemoryDatabase::new());
        let item = db.seed_item("SCL-1", "Scale", Stock::full(1).unwrap()).await;
        (AttachmentsHandler::new(db.clone(), db), item.id())
    }

    #[tokio::test]
    async fn notes_are_listed_newest_first() {
        let (handler, item) = setup().await;
        handler
            .add_note(NewNote::new(item.as_i64(), "first", None).unwrap())
            .await
            .unwrap();
        handler
            .add_note(NewNote::new(item.as_i64(), "second", Some("amy".into())).unwrap())
            .await
            .unwrap();

        let notes = handler.list_notes(item).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note_text, "second");
        assert_eq!(notes[0].created_by.as_deref(), Some("amy"));
    }

    #[tokio::test]
    async fn note_on_missing_item_is_not_found() {
        let (handler, _) = setup().await;
        let err = handler
            .add_note(NewNote::new(77, "orphan", None).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::ItemNotFound(ItemId::from_raw(77)));
    }

    #[tokio::test]
    async fn instructions_round_trip() {
        let (handler, item) = setup().await;
        let id = handler
            .add_instruction(
                NewInstruction::new(item.as_i64(), "Tare", "Press TARE before weighing", None)
                    .unwrap(),
            )
            .await
            .unwrap();

        let listed = handler.list_instructions(item).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Tare");

        let full = handler.get_instruction(id).await.unwrap();
        assert_eq!(full.body, "Press TARE before weighing");

        let err = handler
            .get_instruction(InstructionId::from_raw(999))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InstructionNotFound(_)));
    }
}
