mod api;
mod auth;
mod order;
mod product;
mod stock;
mod user;

pub use self::api::ApiResponse;
pub use self::auth::{RegisterResponse, TokenResponse};
pub use self::order::{OrderItemResponse, OrderResponse};
pub use self::product::ProductResponse;
pub use self::stock::{StockCheckResponse, StockLevelResponse};
pub use self::user::UserResponse;
