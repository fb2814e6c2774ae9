//! Catalog ports - equipment items and their attachments.

use async_trait::async_trait;

use crate::domain::equipment::{
    EquipmentItem, EquipmentNote, Instruction, InstructionSummary, NewInstruction, NewItem,
    NewNote,
};
use crate::domain::foundation::{DomainError, InstructionId, ItemId, NoteId};

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 200;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Search and pagination over the item catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl ItemQuery {
    /// Normalizes raw query parameters.
    ///
    /// Out-of-range limits fall back to the default rather than failing.
    pub fn new(search: Option<String>, limit: Option<i64>, offset: Option<i64>) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let limit = match limit {
            Some(n) if n > 0 && n <= MAX_PAGE_LIMIT as i64 => n as u32,
            _ => DEFAULT_PAGE_LIMIT,
        };
        let offset = match offset {
            Some(n) if n >= 0 && n <= u32::MAX as i64 => n as u32,
            _ => 0,
        };
        Self {
            search,
            limit,
            offset,
        }
    }
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Reads and writes catalog items.
///
/// Stock counters are only ever set here at creation; afterwards they
/// change through the lending store.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists items newest first.
    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<EquipmentItem>, DomainError>;

    async fn find_item(&self, id: ItemId) -> Result<Option<EquipmentItem>, DomainError>;

    /// Inserts an item.
    ///
    /// Returns a `Conflict` error if the SKU is already taken.
    async fn insert_item(&self, item: &NewItem) -> Result<EquipmentItem, DomainError>;

    /// Sets an item's image URL. Returns `Ok(false)` if the item is absent.
    async fn set_image_url(&self, id: ItemId, url: &str) -> Result<bool, DomainError>;
}

/// Reads and writes notes and instructions attached to items.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Lists notes for an item, newest first.
    async fn list_notes(&self, item_id: ItemId) -> Result<Vec<EquipmentNote>, DomainError>;

    async fn insert_note(&self, note: &NewNote) -> Result<NoteId, DomainError>;

    /// Lists instruction summaries for an item, newest first.
    async fn list_instructions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InstructionSummary>, DomainError>;

    async fn find_instruction(
        &self,
        id: InstructionId,
    ) -> Result<Option<Instruction>, DomainError>;

    async fn insert_instruction(
        &self,
        instruction: &NewInstruction,
    ) -> Result<InstructionId, DomainError>;
}
