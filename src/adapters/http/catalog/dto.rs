//! HTTP DTOs for catalog, note and instruction endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::equipment::{EquipmentItem, EquipmentNote, Instruction, InstructionSummary};
use crate::domain::foundation::{InstructionId, ItemId, NoteId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query of `GET /api/items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query of the note and instruction listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemIdParams {
    pub item_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetImageRequest {
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub note_text: String,
    /// Defaults to the caller's username.
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInstructionRequest {
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub image_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub quantity: i64,
    pub available_quantity: i64,
    pub unit_cost: f64,
    pub supplier: String,
    /// `YYYY-MM-DD`.
    pub date_purchased: Option<String>,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<EquipmentItem> for ItemResponse {
    fn from(item: EquipmentItem) -> Self {
        let profile = item.profile().clone();
        Self {
            id: item.id(),
            sku: item.sku().to_string(),
            name: item.name().to_string(),
            description: profile.description,
            category: profile.category,
            location: profile.location,
            quantity: item.quantity(),
            available_quantity: item.available_quantity(),
            unit_cost: profile.unit_cost,
            supplier: profile.supplier,
            date_purchased: profile.date_purchased.map(|d| d.date_string()),
            status: profile.status,
            image_url: profile.image_url,
            created_at: *item.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: NoteId,
    pub item_id: ItemId,
    pub note_text: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

impl From<EquipmentNote> for NoteResponse {
    fn from(note: EquipmentNote) -> Self {
        Self {
            id: note.id,
            item_id: note.item_id,
            note_text: note.note_text,
            created_by: note.created_by,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionSummaryResponse {
    pub id: InstructionId,
    pub item_id: ItemId,
    pub title: String,
    pub created_at: Timestamp,
}

impl From<InstructionSummary> for InstructionSummaryResponse {
    fn from(summary: InstructionSummary) -> Self {
        Self {
            id: summary.id,
            item_id: summary.item_id,
            title: summary.title,
            created_at: summary.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionResponse {
    pub id: InstructionId,
    pub item_id: ItemId,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Instruction> for InstructionResponse {
    fn from(instruction: Instruction) -> Self {
        Self {
            id: instruction.id,
            item_id: instruction.item_id,
            title: instruction.title,
            body: instruction.body,
            image_url: instruction.image_url,
            created_at: instruction.created_at,
            updated_at: instruction.updated_at,
        }
    }
}

/// Response of a create call that only reports the new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}
