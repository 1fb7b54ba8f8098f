use anyhow::Context;

use gatekey_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatekey_observability::init();

    let config = AppConfig::from_env().context("startup configuration invalid")?;

    let app = gatekey_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await.context("server error")
}
