//! HTTP middleware for axum.
//!
//! - `access` - Public/protected route classification
//! - `auth` - Request gate and the `RequireAuth` extractor

pub mod access;
pub mod auth;

pub use access::{classify, Access};
pub use auth::{
    cookie_value, extract_credentials, request_gate, AuthRejection, RequireAuth,
    AUTH_TOKEN_HEADER,
};
