//! HTTP application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `validation.rs`: field-format pre-pass (runs before the core)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use gatekey_auth::AuthService;
use gatekey_infra::{seed_roles, seed_users, InMemoryAuthStore};

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod validation;

/// Concrete orchestrator over the in-memory backend.
pub type Service = AuthService<Arc<InMemoryAuthStore>, Arc<InMemoryAuthStore>>;

/// Shared per-process services, injected into handlers via `Extension`.
pub struct AppServices {
    pub auth: Service,
    pub store: Arc<InMemoryAuthStore>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Seeds the default roles and users before serving.
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let store = Arc::new(InMemoryAuthStore::new());
    seed_roles(&store)?;
    seed_users(&store, &config.seed_users)?;

    let auth = AuthService::new(store.clone(), store.clone(), config.token.clone());
    let services = Arc::new(AppServices { auth, store });

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(Extension(services)))
}
