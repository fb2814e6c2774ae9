//! Stock counters for a single equipment item.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical and lendable unit counts of one item.
///
/// # Invariants
///
/// - `0 <= available <= quantity`
///
/// Every mutation goes through [`Stock::reserve`] or [`Stock::release`],
/// both of which leave the value untouched when they fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    quantity: i64,
    available: i64,
}

/// Reasons a stock mutation is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("not enough stock: available={available}")]
    Insufficient { available: i64, requested: i64 },

    #[error("release of {released} would exceed quantity {quantity} (available={available})")]
    OverRelease {
        quantity: i64,
        available: i64,
        released: i64,
    },

    #[error("quantity must be > 0, got {0}")]
    NonPositive(i64),

    #[error("available quantity {available} must be between 0 and {quantity}")]
    OutOfBounds { quantity: i64, available: i64 },
}

impl Stock {
    /// Creates a stock value, enforcing the bounds invariant.
    pub fn new(quantity: i64, available: i64) -> Result<Self, StockError> {
        if quantity < 0 || available < 0 || available > quantity {
            return Err(StockError::OutOfBounds {
                quantity,
                available,
            });
        }
        Ok(Self {
            quantity,
            available,
        })
    }

    /// Fully available stock of `quantity` units.
    pub fn full(quantity: i64) -> Result<Self, StockError> {
        Self::new(quantity, quantity)
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn available(&self) -> i64 {
        self.available
    }

    /// Units currently lent out.
    pub fn on_loan(&self) -> i64 {
        self.quantity - self.available
    }

    /// Takes `qty` units out of the lendable pool.
    pub fn reserve(&mut self, qty: i64) -> Result<(), StockError> {
        if qty <= 0 {
            return Err(StockError::NonPositive(qty));
        }
        if self.available < qty {
            return Err(StockError::Insufficient {
                available: self.available,
                requested: qty,
            });
        }
        self.available -= qty;
        Ok(())
    }

    /// Puts `qty` units back into the lendable pool.
    pub fn release(&mut self, qty: i64) -> Result<(), StockError> {
        if qty <= 0 {
            return Err(StockError::NonPositive(qty));
        }
        if self.available + qty > self.quantity {
            return Err(StockError::OverRelease {
                quantity: self.quantity,
                available: self.available,
                released: qty,
            });
        }
        self.available += qty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_available_above_quantity() {
        assert!(Stock::new(3, 4).is_err());
        assert!(Stock::new(-1, 0).is_err());
        assert!(Stock::new(3, -1).is_err());
        assert!(Stock::new(0, 0).is_ok());
    }

    #[test]
    fn reserve_decrements_available() {
        let mut stock = Stock::full(5).unwrap();
        stock.reserve(3).unwrap();
        assert_eq!(stock.available(), 2);
        assert_eq!(stock.on_loan(), 3);
    }

    #[test]
    fn reserve_refuses_more_than_available_without_change() {
        let mut stock = Stock::new(10, 6).unwrap();
        let err = stock.reserve(7).unwrap_err();
        assert_eq!(
            err,
            StockError::Insufficient {
                available: 6,
                requested: 7
            }
        );
        assert_eq!(err.to_string(), "not enough stock: available=6");
        assert_eq!(stock.available(), 6);
    }

    #[test]
    fn reserve_and_release_reject_non_positive() {
        let mut stock = Stock::full(2).unwrap();
        assert_eq!(stock.reserve(0), Err(StockError::NonPositive(0)));
        assert_eq!(stock.release(-1), Err(StockError::NonPositive(-1)));
    }

    #[test]
    fn release_never_exceeds_quantity() {
        let mut stock = Stock::new(4, 3).unwrap();
        assert!(matches!(stock.release(2), Err(StockError::OverRelease { .. })));
        assert_eq!(stock.available(), 3);
        stock.release(1).unwrap();
        assert_eq!(stock.available(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Reserve(i64),
        Release(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-2i64..8).prop_map(Op::Reserve),
            (-2i64..8).prop_map(Op::Release),
        ]
    }

    proptest! {
        #[test]
        fn available_stays_within_bounds(
            quantity in 0i64..20,
            ops in proptest::collection::vec(op(), 0..64),
        ) {
            let mut stock = Stock::full(quantity).unwrap();
            for op in ops {
                let before = stock;
                let result = match op {
                    Op::Reserve(n) => stock.reserve(n),
                    Op::Release(n) => stock.release(n),
                };
                if result.is_err() {
                    prop_assert_eq!(stock, before);
                }
                prop_assert!(stock.available() >= 0);
                prop_assert!(stock.available() <= stock.quantity());
                prop_assert_eq!(stock.quantity(), quantity);
            }
        }
    }
}
