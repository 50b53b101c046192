//! Order Models
//!
//! Orders and their children are immutable price snapshots. Item and
//! option rows carry denormalized names and prices copied from the catalog
//! at submission time, so later catalog edits never touch history.

use serde::{Deserialize, Serialize};

/// Order status
///
/// Declaration order documents the conventional pipeline; transitions are
/// not enforced, and `set_status` accepts any status from any status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    New,
    Confirmed,
    InProgress,
    OutForDelivery,
    Completed,
    Cancelled,
}

/// Payment method chosen by the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileWallet,
}

/// Delivery method chosen by the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DeliveryMethod {
    Standard,
    Fast,
}

/// Order entity
///
/// Invariant: `total_amount = sub_total + delivery_fee - discount_amount`,
/// clamped at zero. `voucher_code` is set only when `discount_amount > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_note: Option<String>,
    pub sub_total: i64,
    pub delivery_fee: i64,
    pub discount_amount: i64,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub delivery_method: DeliveryMethod,
    pub voucher_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item (price snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Product name at order time
    pub product_name: String,
    pub quantity: i64,
    /// Base price plus selected option adjustments, at order time
    pub unit_price: i64,
    pub note: Option<String>,
}

/// Selected option on an order line (price snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemOption {
    pub id: i64,
    pub order_item_id: i64,
    /// Option group name at order time
    pub group_name: String,
    /// Option value name at order time
    pub value_name: String,
    /// Price adjustment at order time
    pub added_price: i64,
}
