//! Voucher Model

use serde::{Deserialize, Serialize};

/// Discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VoucherKind {
    /// `value` is percentage points of the subtotal
    Percentage,
    /// `value` is a flat currency amount
    Fixed,
}

/// Voucher entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Voucher {
    pub id: i64,
    /// Unique redemption code
    pub code: String,
    pub description: Option<String>,
    pub kind: VoucherKind,
    /// Percentage points or currency amount depending on `kind`
    pub value: f64,
    /// Minimum order subtotal required to apply this voucher
    pub min_order_value: i64,
    /// Discount ceiling; only meaningful for the percentage kind
    pub max_discount: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create voucher payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherCreate {
    pub code: String,
    pub description: Option<String>,
    pub kind: VoucherKind,
    pub value: f64,
    pub min_order_value: Option<i64>,
    pub max_discount: Option<i64>,
    pub is_active: Option<bool>,
}

/// Update voucher payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoucherUpdate {
    pub code: Option<String>,
    pub description: Option<String>,
    pub kind: Option<VoucherKind>,
    pub value: Option<f64>,
    pub min_order_value: Option<i64>,
    pub max_discount: Option<i64>,
    pub is_active: Option<bool>,
}
