//! Session domain module.
//!
//! Login sessions, the opaque tokens that key them, and the credential
//! channels a token can arrive on.

mod credentials;
#[allow(clippy::module_inception)]
mod session;
mod token;

pub use credentials::Credentials;
pub use session::Session;
pub use token::{SessionToken, TOKEN_BYTES};
