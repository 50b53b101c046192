//! Catalog Module
//!
//! Assembles the fully nested public menu from batched reads. Catalog
//! mutation goes through the repository functions directly; this service
//! only builds the customer-facing view.

use crate::db::repository::{self, RepoResult};
use serde::{Deserialize, Serialize};
use shared::models::{OptionValue, SelectionType};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Option group with its values, as shown in the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionGroup {
    pub id: i64,
    pub name: String,
    pub selection: SelectionType,
    pub display_order: i32,
    pub values: Vec<OptionValue>,
}

/// Product with its option groups, as shown in the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuProduct {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub image_url: Option<String>,
    pub is_best_seller: bool,
    pub is_out_of_stock: bool,
    pub sort_order: i32,
    pub option_groups: Vec<MenuOptionGroup>,
}

/// Category with its products, as shown in the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    pub products: Vec<MenuProduct>,
}

/// Read-side catalog assembly
#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full nested menu: categories by sort order, products by sort
    /// order, option groups by display order, values in insertion order.
    ///
    /// Five batched queries joined in memory; no per-product round trips.
    pub async fn menu(&self) -> RepoResult<Vec<MenuCategory>> {
        let categories = repository::category::find_all(&self.pool).await?;
        let products = repository::product::find_all(&self.pool).await?;
        let links = repository::product::find_all_group_links(&self.pool).await?;
        let groups = repository::option_group::find_all(&self.pool).await?;
        let values = repository::option_group::find_all_values(&self.pool).await?;

        let mut values_by_group: HashMap<i64, Vec<OptionValue>> = HashMap::new();
        for value in values {
            values_by_group
                .entry(value.option_group_id)
                .or_default()
                .push(value);
        }

        let groups_by_id: HashMap<i64, MenuOptionGroup> = groups
            .into_iter()
            .map(|g| {
                let values = values_by_group.remove(&g.id).unwrap_or_default();
                (
                    g.id,
                    MenuOptionGroup {
                        id: g.id,
                        name: g.name,
                        selection: g.selection,
                        display_order: g.display_order,
                        values,
                    },
                )
            })
            .collect();

        let mut group_ids_by_product: HashMap<i64, Vec<i64>> = HashMap::new();
        for link in links {
            group_ids_by_product
                .entry(link.product_id)
                .or_default()
                .push(link.option_group_id);
        }

        let mut products_by_category: HashMap<i64, Vec<MenuProduct>> = HashMap::new();
        for product in products {
            let mut option_groups: Vec<MenuOptionGroup> = group_ids_by_product
                .remove(&product.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|group_id| groups_by_id.get(&group_id).cloned())
                .collect();
            option_groups.sort_by_key(|g| (g.display_order, g.id));

            products_by_category
                .entry(product.category_id)
                .or_default()
                .push(MenuProduct {
                    id: product.id,
                    name: product.name,
                    description: product.description,
                    base_price: product.base_price,
                    image_url: product.image_url,
                    is_best_seller: product.is_best_seller,
                    is_out_of_stock: product.is_out_of_stock,
                    sort_order: product.sort_order,
                    option_groups,
                });
        }

        Ok(categories
            .into_iter()
            .map(|category| MenuCategory {
                products: products_by_category.remove(&category.id).unwrap_or_default(),
                id: category.id,
                name: category.name,
                sort_order: category.sort_order,
            })
            .collect())
    }
}
