//! Option Group and Option Value Models
//!
//! An option group ("Size", "Toppings") owns an ordered collection of
//! option values; deleting a group deletes its values. Products reference
//! groups through a bare junction table.

use serde::{Deserialize, Serialize};

/// Selection mode of an option group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SelectionType {
    /// Exactly one value may be chosen
    Single,
    /// Any number of values may be chosen
    Multi,
}

/// Option group entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OptionGroup {
    pub id: i64,
    pub name: String,
    pub selection: SelectionType,
    pub display_order: i32,
}

/// Create option group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroupCreate {
    pub name: String,
    pub selection: SelectionType,
    pub display_order: Option<i32>,
}

/// Update option group payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionGroupUpdate {
    pub name: Option<String>,
    pub selection: Option<SelectionType>,
    pub display_order: Option<i32>,
}

/// Option value entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OptionValue {
    pub id: i64,
    pub name: String,
    /// Price delta in whole currency units; may be negative or zero
    pub price_adjustment: i64,
    /// Advisory only; never enforced during pricing or submission
    pub is_out_of_stock: bool,
    pub option_group_id: i64,
}

/// Create option value payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionValueCreate {
    pub name: String,
    pub price_adjustment: i64,
    pub is_out_of_stock: Option<bool>,
}

/// Update option value payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionValueUpdate {
    pub name: Option<String>,
    pub price_adjustment: Option<i64>,
    pub is_out_of_stock: Option<bool>,
}

/// Option value joined with its owning group's name
///
/// Read model for the batched pricing fetch; the group name is what gets
/// denormalized into order item option snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OptionValueWithGroup {
    pub id: i64,
    pub name: String,
    pub price_adjustment: i64,
    pub is_out_of_stock: bool,
    pub option_group_id: i64,
    pub group_name: String,
}
