pub mod auth;
pub mod hashing;
pub mod jwt;
pub mod order;
pub mod product;
pub mod product_client;
pub mod stock;
pub mod user;
