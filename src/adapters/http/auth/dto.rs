//! HTTP DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Actor;

/// Body of login and registration responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    /// Session expiry as Unix seconds.
    pub exp: i64,
    pub user: Actor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub timestamp: String,
}
