use anyhow::{Context, Result, anyhow};
use jsonwebtoken::Algorithm;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt: JwtSettings,
    pub bcrypt_cost: u32,
    pub run_migrations: bool,
    pub dev_mode: bool,
    pub auth: ServiceConfig,
    pub order: ServiceConfig,
    pub product: ServiceConfig,
    pub product_client: ProductClientConfig,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub database_url: String,
}

#[derive(Debug, Clone)]
pub struct ProductClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .context("Missing env: JWT_SECRET")?;

        let algorithm = match lookup("JWT_ALGORITHM").as_deref() {
            None | Some("HS256") => Algorithm::HS256,
            Some("HS384") => Algorithm::HS384,
            Some("HS512") => Algorithm::HS512,
            Some(other) => {
                return Err(anyhow!(
                    "JWT_ALGORITHM must be one of HS256, HS384, HS512, got '{other}'"
                ));
            }
        };

        let access_token_expire_minutes =
            parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 60_i64)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        let run_migrations = parse_bool(&lookup, "RUN_MIGRATIONS", true)?;
        let dev_mode = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            jwt: JwtSettings {
                secret,
                algorithm,
                access_token_expire_minutes,
            },
            bcrypt_cost,
            run_migrations,
            dev_mode,
            auth: ServiceConfig::from_lookup(&lookup, "AUTH", 8000, "sqlite://auth.db?mode=rwc")?,
            order: ServiceConfig::from_lookup(
                &lookup,
                "ORDER",
                8001,
                "sqlite://orders.db?mode=rwc",
            )?,
            product: ServiceConfig::from_lookup(
                &lookup,
                "PRODUCT",
                8002,
                "sqlite://products.db?mode=rwc",
            )?,
            product_client: ProductClientConfig::from_lookup(&lookup)?,
        })
    }
}

impl ServiceConfig {
    pub fn from_lookup<F>(
        lookup: &F,
        prefix: &str,
        default_port: u16,
        default_database_url: &str,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(lookup, &format!("{prefix}_PORT"), default_port)?;
        let database_url = lookup(&format!("{prefix}_DATABASE_URL"))
            .unwrap_or_else(|| default_database_url.to_string());

        Ok(Self { port, database_url })
    }
}

impl ProductClientConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("PRODUCT_SERVICE_URL")
            .unwrap_or_else(|| "http://127.0.0.1:8002".to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = parse_or(lookup, "PRODUCT_SERVICE_TIMEOUT_SECS", 5_u64)?;
        let retries = parse_or(lookup, "PRODUCT_SERVICE_RETRIES", 2_u32)?;
        let backoff_ms = parse_or(lookup, "PRODUCT_SERVICE_BACKOFF_MS", 500_u64)?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            retries,
            backoff: Duration::from_millis(backoff_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref() {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt.access_token_expire_minutes, 60);
        assert_eq!(config.auth.port, 8000);
        assert_eq!(config.order.port, 8001);
        assert_eq!(config.product.port, 8002);
        assert_eq!(config.product_client.base_url, "http://127.0.0.1:8002");
        assert_eq!(config.product_client.retries, 2);
        assert_eq!(config.product_client.backoff, Duration::from_millis(500));
        assert!(config.run_migrations);
    }

    #[test]
    fn missing_secret_is_rejected() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("JWT_SECRET", "  ")]).is_err());
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = config_from(&[("JWT_SECRET", "x"), ("AUTH_PORT", "eighty")]).unwrap_err();
        assert!(format!("{err:#}").contains("AUTH_PORT"));

        let err = config_from(&[("JWT_SECRET", "x"), ("RUN_MIGRATIONS", "yes")]).unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }

    #[test]
    fn unsupported_algorithm_is_rejected() {
        assert!(config_from(&[("JWT_SECRET", "x"), ("JWT_ALGORITHM", "RS256")]).is_err());
        let config = config_from(&[("JWT_SECRET", "x"), ("JWT_ALGORITHM", "HS512")]).unwrap();
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);
    }

    #[test]
    fn product_url_drops_trailing_slash() {
        let config = config_from(&[
            ("JWT_SECRET", "x"),
            ("PRODUCT_SERVICE_URL", "http://products:9000/"),
        ])
        .unwrap();
        assert_eq!(config.product_client.base_url, "http://products:9000");
    }
}
