//! Cart, pricing and submission types

use crate::models::{DeliveryMethod, OrderItem, OrderItemOption, OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};

/// One client-selected cart line
///
/// Only ids and the quantity are trusted as references; every price is
/// re-resolved from the catalog by the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    /// Must be >= 1
    pub quantity: i64,
    /// Selected option value ids, across any of the product's groups
    #[serde(default)]
    pub options: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Pricing request: the cart plus delivery and voucher choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub items: Vec<CartItem>,
    pub delivery_method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_code: Option<String>,
}

/// Authoritative price breakdown, all amounts in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub sub_total: i64,
    pub delivery_fee: i64,
    pub discount_amount: i64,
    pub total_amount: i64,
}

/// Order submission request: the cart plus customer and payment details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub cart: CalculateRequest,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    pub payment_method: PaymentMethod,
}

/// Confirmation returned to the submitting customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: i64,
    pub status: OrderStatus,
    pub total_amount: i64,
}

/// Order list entry for the admin overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub customer_name: String,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// One order line with its selected options, for the admin detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub options: Vec<OrderItemOption>,
}

/// Full order with items, for the admin detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: crate::models::Order,
    pub items: Vec<OrderItemDetail>,
}
