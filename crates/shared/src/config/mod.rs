mod database;
mod hashing;
mod jwt;
mod myconfig;

pub use self::database::{
    AUTH_MIGRATOR, ConnectionManager, ConnectionPool, ORDER_MIGRATOR, PRODUCT_MIGRATOR,
};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig};
pub use self::myconfig::{Config, JwtSettings, ProductClientConfig, ServiceConfig};
