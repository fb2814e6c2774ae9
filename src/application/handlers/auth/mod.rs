//! Authentication handlers: actor resolution, login, logout, registration.

mod login;
mod logout;
mod register;
mod resolve_actor;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use register::RegisterHandler;
pub use resolve_actor::{AuthResolver, ResolverSettings};
