//! Audit entries written alongside borrows and returns.

use crate::domain::foundation::{Timestamp, UserId};

/// One append-only line in a user's activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub user_id: UserId,
    pub action: String,
    pub at: Timestamp,
}

impl ActivityEntry {
    pub fn borrowed(user_id: UserId, name: &str, sku: &str, quantity: i64) -> Self {
        Self {
            user_id,
            action: format!("Borrowed {} ({}) x{}", name, sku, quantity),
            at: Timestamp::now(),
        }
    }

    pub fn returned(user_id: UserId, name: &str, sku: &str, quantity: i64) -> Self {
        Self {
            user_id,
            action: format!("Returned {} ({}) x{}", name, sku, quantity),
            at: Timestamp::now(),
        }
    }
}
