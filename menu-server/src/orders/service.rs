//! Order Service
//!
//! Submission recomputes the price breakdown inside the same transaction
//! that writes the order, so the client-supplied cart is never trusted
//! for prices and a half-written order can never exist. Notification
//! emission happens strictly after commit and is fire-and-forget.

use crate::db::repository::{self, RepoError};
use crate::notify::NotificationHub;
use crate::pricing::{PricingEngine, PricingError};
use shared::error::AppError;
use shared::message::{MenuEvent, OrderPlacedEvent};
use shared::models::{Order, OrderItem, OrderItemOption, OrderStatus};
use shared::order::{
    CreateOrderRequest, OrderConfirmation, OrderDetail, OrderItemDetail, OrderSummary,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use thiserror::Error;

/// Order operation failure
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order contains no items")]
    Empty,

    #[error("Order {id} not found")]
    NotFound { id: i64 },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        use shared::error::ErrorCode;
        match err {
            OrderError::Empty => AppError::new(ErrorCode::OrderEmpty),
            OrderError::NotFound { id } => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
                    .with_detail("order_id", id)
            }
            OrderError::Pricing(pricing) => pricing.into(),
            OrderError::Repo(repo) => repo.into(),
        }
    }
}

/// Order submission and administration
#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    engine: PricingEngine,
    events: NotificationHub,
}

impl OrderService {
    pub fn new(pool: SqlitePool, engine: PricingEngine, events: NotificationHub) -> Self {
        Self {
            pool,
            engine,
            events,
        }
    }

    /// Submit an order: reprice, persist atomically, notify.
    ///
    /// All inserts run in one transaction; any failure rolls everything
    /// back and nothing is written. The transaction is dropped (and with
    /// it rolled back) on every early return.
    pub async fn submit(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderConfirmation, OrderError> {
        if request.cart.items.is_empty() {
            return Err(OrderError::Empty);
        }

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        // Authoritative repricing on the transaction's catalog view
        let priced = self.engine.price(&mut tx, &request.cart).await?;

        let now = now_millis();
        let order = Order {
            id: snowflake_id(),
            customer_name: request.customer_name.clone(),
            customer_phone: request.customer_phone.clone(),
            customer_address: request.customer_address.clone(),
            customer_note: request.customer_note.clone(),
            sub_total: priced.breakdown.sub_total,
            delivery_fee: priced.breakdown.delivery_fee,
            discount_amount: priced.breakdown.discount_amount,
            total_amount: priced.breakdown.total_amount,
            status: OrderStatus::New,
            payment_method: request.payment_method,
            delivery_method: request.cart.delivery_method,
            voucher_code: priced.voucher_code.clone(),
            created_at: now,
            updated_at: now,
        };
        repository::order::insert_order(&mut tx, &order).await?;

        for line in &priced.lines {
            let item = OrderItem {
                id: snowflake_id(),
                order_id: order.id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                note: line.note.clone(),
            };
            repository::order::insert_item(&mut tx, &item).await?;

            for option in &line.options {
                let row = OrderItemOption {
                    id: snowflake_id(),
                    order_item_id: item.id,
                    group_name: option.group_name.clone(),
                    value_name: option.value_name.clone(),
                    added_price: option.added_price,
                };
                repository::order::insert_item_option(&mut tx, &row).await?;
            }
        }

        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            order_id = order.id,
            total_amount = order.total_amount,
            items = priced.lines.len(),
            "Order persisted"
        );

        // Fire-and-forget; a delivery problem never un-does the commit
        self.events.publish(MenuEvent::NewOrder(OrderPlacedEvent {
            order_id: order.id,
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            total_amount: order.total_amount,
            delivery_method: order.delivery_method,
            payment_method: order.payment_method,
            status: order.status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }));

        Ok(OrderConfirmation {
            id: order.id,
            status: order.status,
            total_amount: order.total_amount,
        })
    }

    /// Order summaries, newest first
    pub async fn list(&self) -> Result<Vec<OrderSummary>, OrderError> {
        Ok(repository::order::list(&self.pool).await?)
    }

    /// Full order with items and selected options
    pub async fn detail(&self, order_id: i64) -> Result<OrderDetail, OrderError> {
        let order = repository::order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or(OrderError::NotFound { id: order_id })?;

        let items = repository::order::find_items(&self.pool, order_id).await?;
        let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let options = repository::order::find_item_options(&self.pool, &item_ids).await?;

        let mut by_item: std::collections::HashMap<i64, Vec<OrderItemOption>> =
            std::collections::HashMap::new();
        for option in options {
            by_item.entry(option.order_item_id).or_default().push(option);
        }

        let items = items
            .into_iter()
            .map(|item| {
                let options = by_item.remove(&item.id).unwrap_or_default();
                OrderItemDetail { item, options }
            })
            .collect();

        Ok(OrderDetail { order, items })
    }

    /// Set an order's status and publish the change
    pub async fn set_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = repository::order::set_status(&self.pool, order_id, status)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => OrderError::NotFound { id: order_id },
                other => OrderError::Repo(other),
            })?;

        tracing::info!(order_id, status = ?order.status, "Order status updated");

        self.events.publish(MenuEvent::OrderStatusUpdated {
            order_id,
            status: order.status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });

        Ok(order)
    }
}
