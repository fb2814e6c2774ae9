//! Usage instructions attached to an item.

use crate::domain::foundation::{InstructionId, ItemId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub id: InstructionId,
    pub item_id: ItemId,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing view of an instruction; omits the body.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionSummary {
    pub id: InstructionId,
    pub item_id: ItemId,
    pub title: String,
    pub created_at: Timestamp,
}

impl From<&Instruction> for InstructionSummary {
    fn from(i: &Instruction) -> Self {
        Self {
            id: i.id,
            item_id: i.item_id,
            title: i.title.clone(),
            created_at: i.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInstruction {
    pub item_id: ItemId,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl NewInstruction {
    pub fn new(
        item_id: i64,
        title: &str,
        body: &str,
        image_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let (title, body) = (title.trim(), body.trim());
        if item_id <= 0 || title.is_empty() || body.is_empty() {
            return Err(ValidationError::rule("item_id, title, body are required"));
        }
        Ok(Self {
            item_id: ItemId::from_raw(item_id),
            title: title.to_string(),
            body: body.to_string(),
            image_url: image_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_instruction_requires_all_fields() {
        assert!(NewInstruction::new(1, "Power on", "", None).is_err());
        assert!(NewInstruction::new(1, " ", "body", None).is_err());
        assert!(NewInstruction::new(-3, "t", "b", None).is_err());
    }

    #[test]
    fn new_instruction_drops_blank_image_url() {
        let ins = NewInstruction::new(2, " Power on ", "Flip the switch", Some("  ".into()))
            .unwrap();
        assert_eq!(ins.title, "Power on");
        assert!(ins.image_url.is_none());
    }

    #[test]
    fn summary_copies_listing_fields() {
        let now = Timestamp::now();
        let ins = Instruction {
            id: InstructionId::from_raw(9),
            item_id: ItemId::from_raw(2),
            title: "Cleaning".into(),
            body: "Use isopropyl".into(),
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        let summary = InstructionSummary::from(&ins);
        assert_eq!(summary.id, ins.id);
        assert_eq!(summary.title, "Cleaning");
    }
}
