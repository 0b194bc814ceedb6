use anyhow::{Context, Result};
use auth::{handler::AppRouter, state::AppState};
use shared::{
    config::{AUTH_MIGRATOR, Config, ConnectionManager},
    utils::Logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("auth-service", config.dev_mode);

    let pool = ConnectionManager::new_pool(
        &config.auth.database_url,
        &AUTH_MIGRATOR,
        config.run_migrations,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(pool, &config).context("Failed to create AppState")?;

    AppRouter::serve(config.auth.port, state)
        .await
        .context("Failed to start server")?;

    info!("✅ Auth service shutdown complete.");

    Ok(())
}
