use anyhow::{Context, Result};
use order::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager, ORDER_MIGRATOR},
    utils::Logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("order-service", config.dev_mode);

    let pool = ConnectionManager::new_pool(
        &config.order.database_url,
        &ORDER_MIGRATOR,
        config.run_migrations,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(pool, &config).context("Failed to create AppState")?;

    info!(
        "🔗 Product service at {}",
        config.product_client.base_url
    );

    AppRouter::serve(config.order.port, state)
        .await
        .context("Failed to start server")?;

    info!("✅ Order service shutdown complete.");

    Ok(())
}
