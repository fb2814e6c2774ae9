//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresLendingStore` - Row-locked borrow/return transactions
//! - `PostgresCatalogRepository` - Items, notes and instructions
//! - `PostgresCredentialStore` - Users and API tokens

mod catalog_repository;
mod credential_store;
mod lending_store;
mod rows;

pub use catalog_repository::PostgresCatalogRepository;
pub use credential_store::PostgresCredentialStore;
pub use lending_store::{PostgresLendingStore, PostgresLendingTransaction};
