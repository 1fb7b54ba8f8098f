//! Request/response DTOs.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
    pub audience: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub role_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub old_role_name: String,
    pub new_role_name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub is_success: bool,
    pub message: String,
}

impl RegisterResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub is_success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            token: Some(token.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            token: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role_name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub roles: Vec<String>,
}
