pub mod command;
pub mod query;

use crate::{
    errors::RepositoryError,
    model::order::{OrderItemModel, OrderModel, OrderWithItems},
};
use sqlx::SqliteConnection;

pub(crate) const ORDER_SELECT: &str = r#"
    SELECT id, user_id, status, total_amount, created_at, updated_at
    FROM orders
"#;

pub(crate) async fn load_items(
    conn: &mut SqliteConnection,
    order: OrderModel,
) -> Result<OrderWithItems, RepositoryError> {
    let items = sqlx::query_as::<_, OrderItemModel>(
        r#"
        SELECT id, order_id, product_id, qty, unit_price
        FROM order_items
        WHERE order_id = ?1
        ORDER BY id
        "#,
    )
    .bind(order.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(OrderWithItems { order, items })
}
