pub mod order;
pub mod product;
pub mod role;
pub mod user;
