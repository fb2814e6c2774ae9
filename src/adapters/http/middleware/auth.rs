//! Request gate and actor extractor for axum.
//!
//! ```text
//! Request → request_gate → classify → (protected) AuthResolver
//!                                         ↓ Actor in extensions
//!                            Handler → RequireAuth reads it back
//! ```
//!
//! A protected request without a resolvable actor is answered here and
//! never reaches its handler.

use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{Actor, AuthError, ErrorCode};
use crate::domain::session::Credentials;

use super::super::error::error_response;
use super::super::state::AppState;
use super::access::{classify, Access};

/// Header carrying a token when fallback channels are enabled.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Pulls every credential channel out of a request.
pub fn extract_credentials(headers: &HeaderMap, uri: &Uri, cookie_name: &str) -> Credentials {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let query_token = Query::<HashMap<String, String>>::try_from_uri(uri)
        .ok()
        .and_then(|Query(params)| params.get("token").cloned());

    Credentials {
        authorization: header_str(header::AUTHORIZATION.as_str()),
        cookie: cookie_value(headers, cookie_name),
        header_token: header_str(AUTH_TOKEN_HEADER),
        query_token,
    }
}

/// Finds a cookie by name across every `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Authenticates protected routes and injects the resolved [`Actor`].
pub async fn request_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if classify(request.method(), request.uri().path()) == Access::Public {
        return next.run(request).await;
    }

    let credentials = extract_credentials(
        request.headers(),
        request.uri(),
        &state.session.cookie_name,
    );

    match state.resolver().resolve(&credentials).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => gate_rejection(&e),
    }
}

fn gate_rejection(err: &AuthError) -> Response {
    match err {
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(reason = %msg, "auth lookup unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseError,
                "authentication service unavailable",
            )
        }
        AuthError::MissingToken => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthenticated,
            "authentication required",
        ),
        _ => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthenticated,
            "invalid or expired token",
        ),
    }
}

/// Extractor for the actor attached by [`request_gate`].
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Actor);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Actor>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection when a handler needs an actor the gate did not attach.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthenticated,
                "authentication required",
            ),
        }
    }
}
