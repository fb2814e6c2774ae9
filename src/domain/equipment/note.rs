//! Free-text notes attached to an item.

use crate::domain::foundation::{ItemId, NoteId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentNote {
    pub id: NoteId,
    pub item_id: ItemId,
    pub note_text: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

/// A validated note ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub item_id: ItemId,
    pub note_text: String,
    pub created_by: Option<String>,
}

impl NewNote {
    /// Validates raw note input. The text is trimmed and must not be blank.
    pub fn new(
        item_id: i64,
        note_text: &str,
        created_by: Option<String>,
    ) -> Result<Self, ValidationError> {
        let text = note_text.trim();
        if item_id <= 0 || text.is_empty() {
            return Err(ValidationError::rule("item_id and note_text are required"));
        }
        Ok(Self {
            item_id: ItemId::from_raw(item_id),
            note_text: text.to_string(),
            created_by: created_by
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}
