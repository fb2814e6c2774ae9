//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Lending
//!
//! - `LendingStore` / `LendingTransaction` - Item locks, stock and borrow records
//!
//! ## Catalog
//!
//! - `CatalogRepository` - Equipment items
//! - `AttachmentRepository` - Notes and instructions
//!
//! ## Identity
//!
//! - `CredentialStore` - Users and persistent API tokens
//! - `SessionStore` - In-memory login sessions
//! - `PasswordHasher` - One-way credential hashing

mod catalog;
mod credential_store;
mod lending_store;
mod password_hasher;
mod session_store;

pub use catalog::{AttachmentRepository, CatalogRepository, ItemQuery, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use credential_store::{AccountRecord, CredentialStore};
pub use lending_store::{LendingStore, LendingTransaction};
pub use password_hasher::PasswordHasher;
pub use session_store::SessionStore;
