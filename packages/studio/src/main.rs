use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use studio::config::AppConfig;
use studio::database::init_db;
use studio::seed::seed_admin;
use studio::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    seed_admin(&db, &config.auth)
        .await
        .context("Failed to seed admin user")?;

    let mailer = studio::mail::from_config(&config.mail).context("Invalid mail configuration")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState::new(db, config, mailer)
        .await
        .context("Failed to prepare upload directory")?;
    let app = studio::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
