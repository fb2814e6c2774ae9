//! HTTP adapter for the equipment catalog and its notes and instructions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::catalog_routes;
