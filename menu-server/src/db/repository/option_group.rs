//! Option Group and Option Value Repository

use super::{placeholders, RepoError, RepoResult};
use shared::models::{
    OptionGroup, OptionGroupCreate, OptionGroupUpdate, OptionValue, OptionValueCreate,
    OptionValueUpdate, OptionValueWithGroup,
};
use shared::util::snowflake_id;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OptionGroup>> {
    let groups = sqlx::query_as::<_, OptionGroup>(
        "SELECT id, name, selection, display_order FROM option_group ORDER BY display_order, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(groups)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OptionGroup>> {
    let group = sqlx::query_as::<_, OptionGroup>(
        "SELECT id, name, selection, display_order FROM option_group WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(group)
}

pub async fn create(pool: &SqlitePool, data: OptionGroupCreate) -> RepoResult<OptionGroup> {
    let id = snowflake_id();
    sqlx::query("INSERT INTO option_group (id, name, selection, display_order) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(data.selection)
        .bind(data.display_order.unwrap_or(0))
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create option group".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: OptionGroupUpdate) -> RepoResult<OptionGroup> {
    let rows = sqlx::query(
        "UPDATE option_group SET name = COALESCE(?, name), selection = COALESCE(?, selection), display_order = COALESCE(?, display_order) WHERE id = ?",
    )
    .bind(data.name)
    .bind(data.selection)
    .bind(data.display_order)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Option group {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Option group {id} not found")))
}

/// Delete a group with its values and junction rows in one transaction
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM option_value WHERE option_group_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM product_option_group WHERE option_group_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM option_group WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Option group {id} not found")));
    }

    tx.commit().await?;
    Ok(true)
}

// =========================================================================
// Option Values
// =========================================================================

const VALUE_COLUMNS: &str = "id, name, price_adjustment, is_out_of_stock, option_group_id";

pub async fn find_values_by_group(pool: &SqlitePool, group_id: i64) -> RepoResult<Vec<OptionValue>> {
    let values = sqlx::query_as::<_, OptionValue>(&format!(
        "SELECT {VALUE_COLUMNS} FROM option_value WHERE option_group_id = ? ORDER BY id"
    ))
    .bind(group_id)
    .fetch_all(pool)
    .await?;
    Ok(values)
}

pub async fn find_all_values(pool: &SqlitePool) -> RepoResult<Vec<OptionValue>> {
    let values = sqlx::query_as::<_, OptionValue>(&format!(
        "SELECT {VALUE_COLUMNS} FROM option_value ORDER BY option_group_id, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(values)
}

pub async fn find_value_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OptionValue>> {
    let value = sqlx::query_as::<_, OptionValue>(&format!(
        "SELECT {VALUE_COLUMNS} FROM option_value WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(value)
}

/// Batch-fetch option values by id, each joined with its owning group's
/// name. Missing ids are absent from the map.
pub async fn find_values_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> RepoResult<HashMap<i64, OptionValueWithGroup>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT ov.id, ov.name, ov.price_adjustment, ov.is_out_of_stock, ov.option_group_id, og.name AS group_name \
         FROM option_value ov JOIN option_group og ON og.id = ov.option_group_id \
         WHERE ov.id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, OptionValueWithGroup>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let values = query.fetch_all(conn).await?;
    Ok(values.into_iter().map(|v| (v.id, v)).collect())
}

pub async fn create_value(
    pool: &SqlitePool,
    group_id: i64,
    data: OptionValueCreate,
) -> RepoResult<OptionValue> {
    let group_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM option_group WHERE id = ?")
            .bind(group_id)
            .fetch_one(pool)
            .await?;
    if group_exists == 0 {
        return Err(RepoError::NotFound(format!("Option group {group_id} not found")));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO option_value (id, name, price_adjustment, is_out_of_stock, option_group_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price_adjustment)
    .bind(data.is_out_of_stock.unwrap_or(false))
    .bind(group_id)
    .execute(pool)
    .await?;
    find_value_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create option value".into()))
}

pub async fn update_value(
    pool: &SqlitePool,
    id: i64,
    data: OptionValueUpdate,
) -> RepoResult<OptionValue> {
    let rows = sqlx::query(
        "UPDATE option_value SET name = COALESCE(?, name), price_adjustment = COALESCE(?, price_adjustment), is_out_of_stock = COALESCE(?, is_out_of_stock) WHERE id = ?",
    )
    .bind(data.name)
    .bind(data.price_adjustment)
    .bind(data.is_out_of_stock)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Option value {id} not found")));
    }
    find_value_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Option value {id} not found")))
}

pub async fn delete_value(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM option_value WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Option value {id} not found")));
    }
    Ok(true)
}
