//! In-memory storage adapters.

mod database;
mod lending;

pub use database::InMemoryDatabase;
pub use lending::InMemoryTransaction;
