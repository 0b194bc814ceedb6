use anyhow::{Context, Result};
use product::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager, PRODUCT_MIGRATOR},
    utils::Logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("product-service", config.dev_mode);

    let pool = ConnectionManager::new_pool(
        &config.product.database_url,
        &PRODUCT_MIGRATOR,
        config.run_migrations,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(pool, &config).context("Failed to create AppState")?;

    let seeded = state
        .di_container
        .product
        .command
        .seed_defaults()
        .await
        .context("Failed to seed default products")?;
    info!("🌱 Catalogue ready ({seeded} products seeded)");

    AppRouter::serve(config.product.port, state)
        .await
        .context("Failed to start server")?;

    info!("✅ Product service shutdown complete.");

    Ok(())
}
