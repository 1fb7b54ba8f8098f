//! Role directory endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use gatekey_auth::RoleDirectory;

use crate::app::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::app::{errors, validation, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_roles).post(create_role).put(update_role))
        .route("/:name", delete(delete_role))
}

/// GET /api/roles - list all role names.
pub async fn list_roles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list() {
        Ok(roles) => {
            let response: Vec<RoleResponse> = roles
                .into_iter()
                .map(|role_name| RoleResponse { role_name })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => errors::role_error_to_response(e),
    }
}

/// POST /api/roles - create a role.
pub async fn create_role(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<CreateRoleRequest>,
) -> axum::response::Response {
    if let Err(reasons) = validation::validate_create_role(&request) {
        return errors::validation_failure(reasons);
    }
    match services.store.create(&request.role_name) {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => errors::role_error_to_response(e),
    }
}

/// PUT /api/roles - rename a role (cascades to bound identities).
pub async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<UpdateRoleRequest>,
) -> axum::response::Response {
    if let Err(reasons) = validation::validate_update_role(&request) {
        return errors::validation_failure(reasons);
    }
    match services
        .store
        .rename(&request.old_role_name, &request.new_role_name)
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::role_error_to_response(e),
    }
}

/// DELETE /api/roles/:name - delete a role (bindings are left in place).
pub async fn delete_role(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store.delete(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::role_error_to_response(e),
    }
}
