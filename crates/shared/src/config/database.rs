use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::info;

pub type ConnectionPool = SqlitePool;

pub static AUTH_MIGRATOR: Migrator = sqlx::migrate!("./migrations/auth");
pub static PRODUCT_MIGRATOR: Migrator = sqlx::migrate!("./migrations/product");
pub static ORDER_MIGRATOR: Migrator = sqlx::migrate!("./migrations/order");

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        database_url: &str,
        migrator: &Migrator,
        run_migrations: bool,
    ) -> Result<ConnectionPool> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {database_url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to the database")?;

        if run_migrations {
            migrator
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("✅ Migrations applied for {database_url}");
        }

        Ok(pool)
    }

    /// Single-connection in-memory database, used by tests.
    pub async fn in_memory(migrator: &Migrator) -> Result<ConnectionPool> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        migrator.run(&pool).await?;

        Ok(pool)
    }
}
