//! Strongly-typed identifier value objects.
//!
//! All persistent identities are database-assigned positive integers.
//! Wrapping them keeps an item id from being passed where a borrow id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        "must be a positive integer",
                    ));
                }
                Ok(Self(value))
            }

            /// Wraps a value loaded from storage without validation.
            pub fn from_raw(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner integer.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format($field, "not an integer"))?;
                Self::new(value)
            }
        }
    };
}

numeric_id!(
    /// Identifier of an equipment item in the catalog.
    ItemId,
    "item_id"
);

numeric_id!(
    /// Identifier of a borrow record.
    BorrowId,
    "borrow_id"
);

numeric_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);

numeric_id!(NoteId, "note_id");

numeric_id!(InstructionId, "instruction_id");
