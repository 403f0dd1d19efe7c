//! Hubgate binary entry point

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = hubgate_infra::config::load().context("loading configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = hubgate_app::context::AppContext::new(config)
        .context("wiring application context")?;
    let app = hubgate_app::router(ctx);

    let listener =
        tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "hubgate listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
