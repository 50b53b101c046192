//! Order Repository
//!
//! Insert functions take `&mut SqliteConnection` so the order service can
//! run them inside its single submission transaction. Orders are written
//! once and never updated except for `status`/`updated_at`.

use super::{placeholders, RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderItemOption, OrderStatus};
use shared::order::OrderSummary;
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "id, customer_name, customer_phone, customer_address, customer_note, sub_total, delivery_fee, discount_amount, total_amount, status, payment_method, delivery_method, voucher_code, created_at, updated_at";

pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, customer_name, customer_phone, customer_address, customer_note, sub_total, delivery_fee, discount_amount, total_amount, status, payment_method, delivery_method, voucher_code, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.customer_address)
    .bind(&order.customer_note)
    .bind(order.sub_total)
    .bind(order.delivery_fee)
    .bind(order.discount_amount)
    .bind(order.total_amount)
    .bind(order.status)
    .bind(order.payment_method)
    .bind(order.delivery_method)
    .bind(&order.voucher_code)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (id, order_id, product_name, quantity, unit_price, note) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(&item.note)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_item_option(
    conn: &mut SqliteConnection,
    option: &OrderItemOption,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item_option (id, order_item_id, group_name, value_name, added_price) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(option.id)
    .bind(option.order_item_id)
    .bind(&option.group_name)
    .bind(&option.value_name)
    .bind(option.added_price)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

/// Order summaries, newest first
pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT id, customer_name, total_amount, status, created_at FROM orders ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_name, quantity, unit_price, note FROM order_item WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Selected options for a set of order items, in one round trip
pub async fn find_item_options(
    pool: &SqlitePool,
    item_ids: &[i64],
) -> RepoResult<Vec<OrderItemOption>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id, order_item_id, group_name, value_name, added_price FROM order_item_option WHERE order_item_id IN ({}) ORDER BY id",
        placeholders(item_ids.len())
    );
    let mut query = sqlx::query_as::<_, OrderItemOption>(&sql);
    for id in item_ids {
        query = query.bind(id);
    }
    let options = query.fetch_all(pool).await?;
    Ok(options)
}

/// Set an order's status. Any status may follow any other; transitions
/// are an administrative decision, not enforced here.
pub async fn set_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
