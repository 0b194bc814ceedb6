pub mod auth;
pub mod order;
pub mod product;
pub mod stock;

pub use self::auth::{AuthRequest, CurrentUser, RegisterRequest};
pub use self::order::{CreateOrderItemRequest, CreateOrderRequest, FindAllOrders};
pub use self::product::{CreateProductRequest, UpdateProductRequest};
pub use self::stock::{StockAdjustQuery, StockCheckQuery};
