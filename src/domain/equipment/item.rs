//! Equipment item entity and catalog input validation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, Timestamp, ValidationError};

use super::{Stock, StockError};

/// Status assigned to new items when none is given.
pub const DEFAULT_STATUS: &str = "active";

/// Descriptive attributes of an item. None of these take part in lending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemProfile {
    pub description: String,
    pub category: String,
    pub location: String,
    /// Stored and returned as given; no currency semantics.
    pub unit_cost: f64,
    pub supplier: String,
    pub date_purchased: Option<Timestamp>,
    pub status: String,
    pub image_url: Option<String>,
}

/// A catalog entry for a pool of identical physical units.
///
/// # Invariants
///
/// - `sku` is unique across the catalog
/// - stock bounds hold (see [`Stock`])
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentItem {
    id: ItemId,
    sku: String,
    name: String,
    profile: ItemProfile,
    stock: Stock,
    created_at: Timestamp,
}

impl EquipmentItem {
    /// Reconstitute an item from persistence.
    pub fn reconstitute(
        id: ItemId,
        sku: String,
        name: String,
        profile: ItemProfile,
        stock: Stock,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sku,
            name,
            profile,
            stock,
            created_at,
        }
    }

    /// Materializes a validated draft under a store-assigned id.
    pub fn from_new(id: ItemId, new: NewItem, created_at: Timestamp) -> Self {
        Self {
            id,
            sku: new.sku,
            name: new.name,
            profile: new.profile,
            stock: new.stock,
            created_at,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &ItemProfile {
        &self.profile
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    pub fn quantity(&self) -> i64 {
        self.stock.quantity()
    }

    pub fn available_quantity(&self) -> i64 {
        self.stock.available()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Reserves units on this item. Leaves the item untouched on error.
    pub fn reserve(&mut self, qty: i64) -> Result<(), StockError> {
        self.stock.reserve(qty)
    }

    /// Releases units back to this item. Leaves the item untouched on error.
    pub fn release(&mut self, qty: i64) -> Result<(), StockError> {
        self.stock.release(qty)
    }

    /// Applies stock counters loaded from or committed to storage.
    pub fn apply_stock(&mut self, stock: Stock) {
        self.stock = stock;
    }

    pub fn set_image_url(&mut self, url: String) {
        self.profile.image_url = Some(url);
    }

    /// Case-insensitive substring match over name, SKU, category and location.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            self.name.as_str(),
            self.sku.as_str(),
            self.profile.category.as_str(),
            self.profile.location.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Raw catalog input as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItemDraft {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub quantity: Option<i64>,
    pub available_quantity: Option<i64>,
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub supplier: String,
    pub date_purchased: Option<String>,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// A validated item ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub sku: String,
    pub name: String,
    pub profile: ItemProfile,
    pub stock: Stock,
}

impl NewItemDraft {
    /// Trims text fields, applies defaults, and checks every catalog rule.
    pub fn validate(self) -> Result<NewItem, ValidationError> {
        let sku = self.sku.trim().to_string();
        let name = self.name.trim().to_string();
        if sku.is_empty() || name.is_empty() {
            return Err(ValidationError::rule("sku and name are required"));
        }

        let quantity = self.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(ValidationError::rule("quantity must be >= 0"));
        }
        let available = self.available_quantity.unwrap_or(quantity);
        let stock = Stock::new(quantity, available).map_err(|_| {
            ValidationError::rule("available_quantity must be between 0 and quantity")
        })?;

        let unit_cost = self.unit_cost.unwrap_or(0.0);
        if !unit_cost.is_finite() || unit_cost < 0.0 {
            return Err(ValidationError::rule("unit_cost must be >= 0"));
        }

        let date_purchased = Timestamp::parse_optional_date(
            "date_purchased",
            self.date_purchased.as_deref(),
        )
        .map_err(|_| ValidationError::rule("date_purchased must be YYYY-MM-DD"))?;

        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        let image_url = self
            .image_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewItem {
            sku,
            name,
            profile: ItemProfile {
                description: self.description.trim().to_string(),
                category: self.category.trim().to_string(),
                location: self.location.trim().to_string(),
                unit_cost,
                supplier: self.supplier.trim().to_string(),
                date_purchased,
                status,
                image_url,
            },
            stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewItemDraft {
        NewItemDraft {
            sku: " OSC-01 ".to_string(),
            name: "Oscilloscope".to_string(),
            category: "Electronics".to_string(),
            location: "Lab 3".to_string(),
            quantity: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn validate_trims_and_defaults() {
        let item = draft().validate().unwrap();
        assert_eq!(item.sku, "OSC-01");
        assert_eq!(item.stock.available(), 10);
        assert_eq!(item.profile.status, DEFAULT_STATUS);
        assert_eq!(item.profile.unit_cost, 0.0);
        assert!(item.profile.date_purchased.is_none());
    }

    #[test]
    fn validate_requires_sku_and_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(
            d.validate().unwrap_err().to_string(),
            "sku and name are required"
        );
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let mut d = draft();
        d.quantity = Some(-1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn validate_rejects_available_outside_bounds() {
        let mut d = draft();
        d.available_quantity = Some(11);
        assert_eq!(
            d.validate().unwrap_err().to_string(),
            "available_quantity must be between 0 and quantity"
        );
    }

    #[test]
    fn validate_rejects_negative_cost_and_bad_date() {
        let mut d = draft();
        d.unit_cost = Some(-0.5);
        assert!(d.validate().is_err());

        let mut d = draft();
        d.date_purchased = Some("2024/01/01".to_string());
        assert_eq!(
            d.validate().unwrap_err().to_string(),
            "date_purchased must be YYYY-MM-DD"
        );
    }

    #[test]
    fn missing_quantity_defaults_to_zero() {
        let mut d = draft();
        d.quantity = None;
        let item = d.validate().unwrap();
        assert_eq!(item.stock.quantity(), 0);
        assert_eq!(item.stock.available(), 0);
    }

    #[test]
    fn matches_searches_name_sku_category_location() {
        let new = draft().validate().unwrap();
        let item = EquipmentItem::from_new(ItemId::from_raw(1), new, Timestamp::now());
        assert!(item.matches("osc"));
        assert!(item.matches("ELECTRO"));
        assert!(item.matches("lab 3"));
        assert!(!item.matches("microscope"));
    }

    #[test]
    fn reserve_on_item_delegates_to_stock() {
        let new = draft().validate().unwrap();
        let mut item = EquipmentItem::from_new(ItemId::from_raw(1), new, Timestamp::now());
        item.reserve(4).unwrap();
        assert_eq!(item.available_quantity(), 6);
        assert!(item.reserve(7).is_err());
        assert_eq!(item.available_quantity(), 6);
        item.release(4).unwrap();
        assert_eq!(item.available_quantity(), 10);
    }
}
