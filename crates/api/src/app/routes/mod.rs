use axum::Router;

pub mod auth;
pub mod roles;
pub mod system;
pub mod users;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/roles", roles::router())
        .nest("/users", users::router())
}
