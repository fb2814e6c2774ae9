//! HTTP adapter for borrowing and returning equipment.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::lending_routes;
