//! Borrow record entity.
//!
//! A record is created open by a borrow and closed exactly once by a
//! return. It is never deleted.

use crate::domain::foundation::{BorrowId, ItemId, Timestamp, UserId};

use super::{BorrowStatus, LendingError};

/// One lending of `quantity` units of an item to a user.
///
/// # Invariants
///
/// - `quantity > 0`
/// - open ⇔ `actual_return_date` is `None` and `status` is `Borrowed`
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowRecord {
    pub id: BorrowId,
    pub item_id: ItemId,
    pub user_id: UserId,
    pub quantity: i64,
    pub borrow_date: Timestamp,
    /// Expected return date given at borrow time.
    pub return_date: Option<Timestamp>,
    pub actual_return_date: Option<Timestamp>,
    pub condition_on_return: Option<String>,
    pub status: BorrowStatus,
}

impl BorrowRecord {
    /// Materializes a new record under a store-assigned id.
    pub fn open(id: BorrowId, new: NewBorrowRecord) -> Self {
        Self {
            id,
            item_id: new.item_id,
            user_id: new.user_id,
            quantity: new.quantity,
            borrow_date: new.borrow_date,
            return_date: new.return_date,
            actual_return_date: None,
            condition_on_return: None,
            status: BorrowStatus::Borrowed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.actual_return_date.is_none() && self.status == BorrowStatus::Borrowed
    }

    /// Applies the terminal open→returned transition.
    ///
    /// # Errors
    ///
    /// - `AlreadyReturned` if the record is closed
    pub fn close(&mut self, closure: &RecordClosure) -> Result<(), LendingError> {
        if !self.is_open() || !self.status.can_transition_to(&BorrowStatus::Returned) {
            return Err(LendingError::AlreadyReturned(self.id));
        }
        self.actual_return_date = Some(closure.returned_at);
        self.condition_on_return = closure.condition.clone();
        self.status = BorrowStatus::Returned;
        Ok(())
    }
}

/// Fields of a record about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowRecord {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub quantity: i64,
    pub borrow_date: Timestamp,
    pub return_date: Option<Timestamp>,
}

/// Data written when a record is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordClosure {
    pub returned_at: Timestamp,
    pub condition: Option<String>,
}

impl RecordClosure {
    pub fn new(returned_at: Timestamp, condition: Option<String>) -> Self {
        Self {
            returned_at,
            condition: condition
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_record() -> BorrowRecord {
        BorrowRecord::open(
            BorrowId::from_raw(1),
            NewBorrowRecord {
                item_id: ItemId::from_raw(2),
                user_id: UserId::from_raw(3),
                quantity: 4,
                borrow_date: Timestamp::now(),
                return_date: None,
            },
        )
    }

    #[test]
    fn open_record_starts_borrowed() {
        let record = open_record();
        assert!(record.is_open());
        assert_eq!(record.status, BorrowStatus::Borrowed);
        assert!(record.condition_on_return.is_none());
    }

    #[test]
    fn close_sets_return_fields_once() {
        let mut record = open_record();
        let closure = RecordClosure::new(Timestamp::now(), Some(" scratched ".into()));
        record.close(&closure).unwrap();

        assert!(!record.is_open());
        assert_eq!(record.status, BorrowStatus::Returned);
        assert_eq!(record.condition_on_return.as_deref(), Some("scratched"));

        let err = record.close(&closure).unwrap_err();
        assert_eq!(err, LendingError::AlreadyReturned(BorrowId::from_raw(1)));
    }

    #[test]
    fn blank_condition_is_stored_as_none() {
        let closure = RecordClosure::new(Timestamp::now(), Some("   ".into()));
        assert!(closure.condition.is_none());
    }
}
