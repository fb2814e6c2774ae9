//! Lab Lending - shared laboratory equipment catalog and lending service
//!
//! This crate tracks equipment stock, lets authenticated members borrow and
//! return items without overselling under concurrent requests, and resolves
//! callers from session cookies, bearer tokens or persistent API tokens.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
