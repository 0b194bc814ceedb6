pub mod order;
pub mod product;
pub mod stock;
pub mod user;
