//! HTTP adapter for login, logout, registration and health.

mod cookie;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
