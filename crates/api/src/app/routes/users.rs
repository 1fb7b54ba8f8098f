//! User listing endpoint.

use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};

use crate::app::dto::UserResponse;
use crate::app::{errors, AppServices};

pub fn router() -> Router {
    Router::new().route("/", get(list_users))
}

/// GET /api/users - list registered users with their roles.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list_users() {
        Ok(users) => {
            let response: Vec<UserResponse> = users
                .into_iter()
                .map(|u| UserResponse {
                    email: u.email,
                    roles: u.roles,
                })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "user listing failed on store fault");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal server error occurred.",
            )
        }
    }
}
