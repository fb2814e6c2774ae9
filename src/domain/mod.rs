//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, actors, errors)
//! - `equipment` - Catalog items, stock counters, notes and instructions
//! - `lending` - Borrow records and the borrow/return error vocabulary
//! - `session` - Login sessions, tokens and presented credentials
//! - `account` - Registered users and registration/login input

pub mod account;
pub mod equipment;
pub mod foundation;
pub mod lending;
pub mod session;
