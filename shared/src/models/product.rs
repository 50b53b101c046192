//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Base price in whole currency units (non-negative)
    pub base_price: i64,
    pub image_url: Option<String>,
    pub is_best_seller: bool,
    /// Advisory only; never enforced during pricing or submission
    pub is_out_of_stock: bool,
    pub sort_order: i32,
    /// Category reference (required)
    pub category_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub image_url: Option<String>,
    pub is_best_seller: Option<bool>,
    pub is_out_of_stock: Option<bool>,
    pub sort_order: Option<i32>,
    pub category_id: i64,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<i64>,
    pub image_url: Option<String>,
    pub is_best_seller: Option<bool>,
    pub is_out_of_stock: Option<bool>,
    pub sort_order: Option<i32>,
    pub category_id: Option<i64>,
}
