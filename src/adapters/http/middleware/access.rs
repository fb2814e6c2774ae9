//! Route classification for the request gate.

use axum::http::Method;

/// Whether a route needs a resolved actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Classifies a request by method and path.
///
/// Public: auth endpoints, health, CORS preflight, and catalog, note and
/// instruction reads. Everything else, including unknown paths, is
/// protected.
pub fn classify(method: &Method, path: &str) -> Access {
    if method == Method::OPTIONS {
        return Access::Public;
    }
    let path = path.trim_end_matches('/');
    if path == "/api/healthz" || path == "/api/auth" || path.starts_with("/api/auth/") {
        return Access::Public;
    }
    if method != Method::GET && method != Method::HEAD {
        return Access::Protected;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["api", "items"] => Access::Public,
        ["api", "items", "open-borrows"] => Access::Protected,
        ["api", "items", _] => Access::Public,
        ["api", "equipment-notes"] => Access::Public,
        ["api", "instructions"] | ["api", "instructions", _] => Access::Public,
        _ => Access::Protected,
    }
}
