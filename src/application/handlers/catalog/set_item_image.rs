//! SetItemImageHandler - updates an item's picture.

use std::sync::Arc;

use crate::domain::equipment::CatalogError;
use crate::domain::foundation::ItemId;
use crate::ports::CatalogRepository;

#[derive(Debug, Clone)]
pub struct SetItemImageCommand {
    pub item_id: ItemId,
    pub image_url: String,
}

pub struct SetItemImageHandler {
    repository: Arc<dyn CatalogRepository>,
}

impl SetItemImageHandler {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SetItemImageCommand) -> Result<(), CatalogError> {
        let url = cmd.image_url.trim();
        if url.is_empty() {
            return Err(CatalogError::validation("image_url is required"));
        }
        if !self.repository.set_image_url(cmd.item_id, url).await? {
            return Err(CatalogError::ItemNotFound(cmd.item_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::equipment::Stock;

    #[tokio::test]
    async fn sets_trimmed_url() {
        let db = Arc::new(InMemoryDatabase::new());
        let item = db.seed_item("CAM-1", "Camera", Stock::full(1).unwrap()).await;
        let handler = SetItemImageHandler::new(db.clone());

        handler
            .handle(SetItemImageCommand {
                item_id: item.id(),
                image_url: "  https://img.test/cam.png ".into(),
            })
            .await
            .unwrap();

        let stored = db.find_item(item.id()).await.unwrap().unwrap();
        assert_eq!(
            stored.profile().image_url.as_deref(),
            Some("https://img.test/cam.png")
        );
    }

    #[tokio::test]
    async fn blank_url_and_missing_item_are_rejected() {
        let db = Arc::new(InMemoryDatabase::new());
        let handler = SetItemImageHandler::new(db);

        let err = handler
            .handle(SetItemImageCommand {
                item_id: ItemId::from_raw(1),
                image_url: " ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = handler
            .handle(SetItemImageCommand {
                item_id: ItemId::from_raw(1),
                image_url: "https://x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::ItemNotFound(ItemId::from_raw(1)));
    }
}
