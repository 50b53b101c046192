//! Product Repository

use super::{placeholders, RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

const COLUMNS: &str = "id, name, description, base_price, image_url, is_best_seller, is_out_of_stock, sort_order, category_id, created_at, updated_at";

/// Product-to-option-group junction row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupLink {
    pub product_id: i64,
    pub option_group_id: i64,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM product WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(product)
}

/// Batch-fetch products by id in one round trip.
///
/// Missing ids are simply absent from the map; absence is the caller's
/// signal that a reference is invalid.
pub async fn find_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> RepoResult<HashMap<i64, Product>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT {COLUMNS} FROM product WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, Product>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let products = query.fetch_all(conn).await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}

/// All junction rows, for batched menu assembly
pub async fn find_all_group_links(pool: &SqlitePool) -> RepoResult<Vec<GroupLink>> {
    let links = sqlx::query_as::<_, GroupLink>(
        "SELECT product_id, option_group_id FROM product_option_group",
    )
    .fetch_all(pool)
    .await?;
    Ok(links)
}

/// Option group ids linked to one product
pub async fn find_group_ids(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT option_group_id FROM product_option_group WHERE product_id = ?",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let category_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category WHERE id = ?")
            .bind(data.category_id)
            .fetch_one(pool)
            .await?;
    if category_exists == 0 {
        return Err(RepoError::Validation(format!(
            "Category {} does not exist",
            data.category_id
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, description, base_price, image_url, is_best_seller, is_out_of_stock, sort_order, category_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(&data.image_url)
    .bind(data.is_best_seller.unwrap_or(false))
    .bind(data.is_out_of_stock.unwrap_or(false))
    .bind(data.sort_order.unwrap_or(0))
    .bind(data.category_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(category_id) = data.category_id {
        let category_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category WHERE id = ?")
                .bind(category_id)
                .fetch_one(pool)
                .await?;
        if category_exists == 0 {
            return Err(RepoError::Validation(format!(
                "Category {category_id} does not exist"
            )));
        }
    }

    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?, name), description = COALESCE(?, description), base_price = COALESCE(?, base_price), image_url = COALESCE(?, image_url), is_best_seller = COALESCE(?, is_best_seller), is_out_of_stock = COALESCE(?, is_out_of_stock), sort_order = COALESCE(?, sort_order), category_id = COALESCE(?, category_id), updated_at = ? WHERE id = ?",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.base_price)
    .bind(data.image_url)
    .bind(data.is_best_seller)
    .bind(data.is_out_of_stock)
    .bind(data.sort_order)
    .bind(data.category_id)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Delete a product and its junction rows in one transaction
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM product_option_group WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    tx.commit().await?;
    Ok(true)
}

/// Replace the set of option groups linked to a product.
///
/// Every referenced group must exist; the junction set is swapped inside
/// one transaction.
pub async fn set_option_groups(
    pool: &SqlitePool,
    product_id: i64,
    group_ids: &[i64],
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let product_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;
    if product_exists == 0 {
        return Err(RepoError::NotFound(format!("Product {product_id} not found")));
    }

    if !group_ids.is_empty() {
        let sql = format!(
            "SELECT COUNT(*) FROM option_group WHERE id IN ({})",
            placeholders(group_ids.len())
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for id in group_ids {
            query = query.bind(id);
        }
        let found = query.fetch_one(&mut *tx).await?;
        if found != group_ids.len() as i64 {
            return Err(RepoError::Validation(
                "One or more option group ids do not exist".into(),
            ));
        }
    }

    sqlx::query("DELETE FROM product_option_group WHERE product_id = ?")
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
    for group_id in group_ids {
        sqlx::query("INSERT INTO product_option_group (product_id, option_group_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
