//! HTTP handlers for authentication endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::auth::{LoginCommand, LoginResult};
use crate::domain::account::{LoginDraft, RegistrationDraft, RegistrationError};
use crate::domain::foundation::{AuthError, ErrorCode, Timestamp, ValidationError};

use super::super::error::{error_response, json_body, status_for};
use super::super::middleware::extract_credentials;
use super::super::state::AppState;
use super::cookie::{cleared_cookie, session_cookie};
use super::dto::{HealthResponse, OkResponse, SessionResponse};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "lab-lending";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginDraft>, JsonRejection>,
) -> Result<Response, AuthApiError> {
    let (identifier, password) = json_body(payload)?.validate()?;

    let result = state
        .login_handler()
        .handle(LoginCommand {
            identifier,
            password,
        })
        .await?;

    Ok(session_response(&state, result))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationDraft>, JsonRejection>,
) -> Result<Response, RegistrationApiError> {
    let draft = json_body(payload).map_err(RegistrationError::from)?;
    let result = state.register_handler().handle(draft).await?;
    Ok(session_response(&state, result))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let credentials = extract_credentials(&headers, &uri, &state.session.cookie_name);
    let token = credentials.token(state.session.allow_fallback_token);
    state.logout_handler().handle(token).await;

    let mut response = Json(OkResponse::ok()).into_response();
    if let Some(cookie) = cleared_cookie(&state.session) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

/// GET /api/healthz
pub async fn healthz() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        timestamp: Timestamp::now().as_datetime().to_rfc3339(),
    })
}

fn session_response(state: &AppState, result: LoginResult) -> Response {
    let token = result.session.token.as_str().to_string();
    let cookie = session_cookie(&state.session, &token, result.ttl);
    let body = SessionResponse {
        token,
        exp: result.session.expires_at.as_unix_secs(),
        user: result.session.actor,
    };

    let mut response = Json(body).into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for login failures.
#[derive(Debug)]
pub enum AuthApiError {
    Validation(ValidationError),
    Auth(AuthError),
}

impl From<ValidationError> for AuthApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        match self {
            AuthApiError::Validation(err) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationFailed,
                err.to_string(),
            ),
            AuthApiError::Auth(AuthError::ServiceUnavailable(msg)) => {
                tracing::error!(reason = %msg, "login failed on storage");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DatabaseError,
                    "authentication service unavailable",
                )
            }
            AuthApiError::Auth(err) => {
                error_response(StatusCode::UNAUTHORIZED, err.code(), err.to_string())
            }
        }
    }
}

/// API error wrapper for registration failures.
#[derive(Debug)]
pub struct RegistrationApiError(RegistrationError);

impl From<RegistrationError> for RegistrationApiError {
    fn from(err: RegistrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RegistrationApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "registration failed");
        }
        error_response(status, code, self.0.to_string())
    }
}
