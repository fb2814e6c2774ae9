//! Query handlers for reading the item catalog.

use std::sync::Arc;

use crate::domain::equipment::{CatalogError, EquipmentItem};
use crate::domain::foundation::ItemId;
use crate::ports::{CatalogRepository, ItemQuery};

pub struct ListItemsHandler {
    repository: Arc<dyn CatalogRepository>,
}

impl ListItemsHandler {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ItemQuery) -> Result<Vec<EquipmentItem>, CatalogError> {
        Ok(self.repository.list_items(&query).await?)
    }
}

pub struct GetItemHandler {
    repository: Arc<dyn CatalogRepository>,
}

impl GetItemHandler {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: ItemId) -> Result<EquipmentItem, CatalogError> {
        self.repository
            .find_item(id)
            .await?
            .ok_or(CatalogError::ItemNotFound(id))
    }
}
