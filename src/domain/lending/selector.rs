//! Ways a caller can point at an item or an open borrow.

use std::fmt;

use crate::domain::foundation::{BorrowId, ItemId, ValidationError};

/// Identifies an item by numeric id or by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Id(ItemId),
    Sku(String),
}

impl ItemRef {
    /// Builds a reference from optional request fields.
    ///
    /// `item_id` wins when both are present; a blank SKU counts as absent.
    pub fn from_parts(item_id: Option<i64>, sku: Option<&str>) -> Result<Self, ValidationError> {
        let sku = sku.map(str::trim).filter(|s| !s.is_empty());
        match (item_id, sku) {
            (Some(id), _) => Ok(ItemRef::Id(ItemId::new(id)?)),
            (None, Some(sku)) => Ok(ItemRef::Sku(sku.to_string())),
            (None, None) => Err(ValidationError::rule("provide sku or item_id")),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRef::Id(id) => write!(f, "id={}", id),
            ItemRef::Sku(sku) => write!(f, "sku={}", sku),
        }
    }
}

/// Selects the open borrow record a return applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnSelector {
    /// A specific record. Must belong to the returning actor.
    BorrowId(BorrowId),
    /// The actor's only open record for an item.
    Item(ItemRef),
}

impl ReturnSelector {
    /// Builds a selector from optional request fields.
    ///
    /// A borrow id wins over item fields when both are given.
    pub fn from_parts(
        borrow_id: Option<i64>,
        item_id: Option<i64>,
        sku: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if let Some(id) = borrow_id {
            return Ok(ReturnSelector::BorrowId(BorrowId::new(id)?));
        }
        let has_sku = sku.map(|s| !s.trim().is_empty()).unwrap_or(false);
        if item_id.is_none() && !has_sku {
            return Err(ValidationError::rule("provide borrow_id or sku/item_id"));
        }
        ItemRef::from_parts(item_id, sku).map(ReturnSelector::Item)
    }
}
