//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bcrypt password hashing
//! - `http` - axum REST API
//! - `memory` - in-memory catalog, lending and credential stores
//! - `postgres` - sqlx-backed stores
//! - `session` - in-memory session store and its sweeper

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod session;

pub use auth::BcryptHasher;
pub use memory::InMemoryDatabase;
pub use session::InMemorySessionStore;
