//! Account domain module.
//!
//! Registered users as stored, plus validation of registration and login
//! input. Password hashing itself lives behind the `PasswordHasher` port.

mod errors;
mod registration;

pub use errors::RegistrationError;
pub use registration::{LoginDraft, NewAccount, RegistrationDraft};

use crate::domain::foundation::Actor;

/// A persisted user together with the credential hash.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub actor: Actor,
    pub password_hash: String,
}
