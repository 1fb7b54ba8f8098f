//! Error-to-response mapping.
//!
//! Business-rule rejections keep their specific kind and message (4xx);
//! collaborator faults are rendered opaquely (5xx) — detail goes to the log,
//! never to the caller.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use gatekey_auth::{AuthenticateError, RegisterError, RoleError};

use crate::app::dto::{AuthResponse, RegisterResponse};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An internal server error occurred.",
    )
}

pub fn register_error_to_response(err: RegisterError) -> axum::response::Response {
    match err {
        RegisterError::RoleNotFound { .. } => (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::failure("Requested role does not exist")),
        )
            .into_response(),
        RegisterError::CredentialCreationFailed { reasons }
        | RegisterError::RoleBindingFailed { reasons } => (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::failure(reasons.join(", "))),
        )
            .into_response(),
        RegisterError::Store(e) => {
            tracing::error!(error = %e, "register failed on store fault");
            internal_error()
        }
    }
}

pub fn authenticate_error_to_response(err: AuthenticateError) -> axum::response::Response {
    match err {
        AuthenticateError::AccountLockedOut => (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse::failure("User account locked out")),
        )
            .into_response(),
        AuthenticateError::InvalidLogin => (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse::failure("Invalid login attempt")),
        )
            .into_response(),
        AuthenticateError::NoRolesAssigned => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("User has no roles")),
        )
            .into_response(),
        AuthenticateError::InvalidAudience { .. } => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Invalid audience")),
        )
            .into_response(),
        AuthenticateError::InvalidDuration { .. } => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Duration is out of range")),
        )
            .into_response(),
        AuthenticateError::Store(e) => {
            tracing::error!(error = %e, "authenticate failed on store fault");
            internal_error()
        }
        AuthenticateError::Signing(e) => {
            tracing::error!(error = %e, "token signing failed");
            internal_error()
        }
    }
}

pub fn role_error_to_response(err: RoleError) -> axum::response::Response {
    match err {
        RoleError::AlreadyExists { .. } | RoleError::NotFound { .. } => {
            json_error(StatusCode::BAD_REQUEST, "role_error", err.to_string())
        }
        RoleError::Store(e) => {
            tracing::error!(error = %e, "role operation failed on store fault");
            internal_error()
        }
    }
}

pub fn validation_failure(reasons: Vec<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", reasons.join(", "))
}
