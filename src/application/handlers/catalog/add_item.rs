//! AddItemHandler - Command handler for creating catalog items.

use std::sync::Arc;

use tracing::info;

use crate::domain::equipment::{CatalogError, EquipmentItem, NewItemDraft};
use crate::domain::foundation::{Actor, ErrorCode};
use crate::ports::CatalogRepository;

#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub actor: Actor,
    pub draft: NewItemDraft,
}

pub struct AddItemHandler {
    repository: Arc<dyn CatalogRepository>,
}

impl AddItemHandler {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddItemCommand) -> Result<EquipmentItem, CatalogError> {
        let new = cmd.draft.validate()?;

        let item = self.repository.insert_item(&new).await.map_err(|err| {
            if err.code == ErrorCode::Conflict {
                CatalogError::DuplicateSku(new.sku.clone())
            } else {
                err.into()
            }
        })?;

        info!(
            item_id = %item.id(),
            sku = item.sku(),
            user_id = %cmd.actor.id,
            quantity = item.quantity(),
            "catalog item added"
        );
        Ok(item)
    }
}
