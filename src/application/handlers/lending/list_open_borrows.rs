//! ListOpenBorrowsHandler - Query handler for an actor's outstanding loans.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::lending::{BorrowRecord, LendingError};
use crate::ports::LendingStore;

#[derive(Debug, Clone)]
pub struct ListOpenBorrowsQuery {
    pub user_id: UserId,
}

pub struct ListOpenBorrowsHandler {
    store: Arc<dyn LendingStore>,
}

impl ListOpenBorrowsHandler {
    pub fn new(store: Arc<dyn LendingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListOpenBorrowsQuery,
    ) -> Result<Vec<BorrowRecord>, LendingError> {
        Ok(self.store.open_borrows(query.user_id).await?)
    }
}
