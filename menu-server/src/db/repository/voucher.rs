//! Voucher Repository

use super::{RepoError, RepoResult};
use shared::models::{Voucher, VoucherCreate, VoucherUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str =
    "id, code, description, kind, value, min_order_value, max_discount, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Voucher>> {
    let vouchers =
        sqlx::query_as::<_, Voucher>(&format!("SELECT {COLUMNS} FROM voucher ORDER BY id"))
            .fetch_all(pool)
            .await?;
    Ok(vouchers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Voucher>> {
    let voucher =
        sqlx::query_as::<_, Voucher>(&format!("SELECT {COLUMNS} FROM voucher WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(voucher)
}

/// Look up a voucher by code, active vouchers only.
///
/// Inactive or absent codes both come back as `None`; the caller decides
/// whether that is an error.
pub async fn find_active_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> RepoResult<Option<Voucher>> {
    let voucher = sqlx::query_as::<_, Voucher>(&format!(
        "SELECT {COLUMNS} FROM voucher WHERE code = ? AND is_active = 1"
    ))
    .bind(code)
    .fetch_optional(conn)
    .await?;
    Ok(voucher)
}

pub async fn create(pool: &SqlitePool, data: VoucherCreate) -> RepoResult<Voucher> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO voucher (id, code, description, kind, value, min_order_value, max_discount, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.code)
    .bind(&data.description)
    .bind(data.kind)
    .bind(data.value)
    .bind(data.min_order_value.unwrap_or(0))
    .bind(data.max_discount)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Voucher code '{}' already exists", data.code))
        }
        other => other,
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create voucher".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: VoucherUpdate) -> RepoResult<Voucher> {
    let rows = sqlx::query(
        "UPDATE voucher SET code = COALESCE(?, code), description = COALESCE(?, description), kind = COALESCE(?, kind), value = COALESCE(?, value), min_order_value = COALESCE(?, min_order_value), max_discount = COALESCE(?, max_discount), is_active = COALESCE(?, is_active), updated_at = ? WHERE id = ?",
    )
    .bind(data.code)
    .bind(data.description)
    .bind(data.kind)
    .bind(data.value)
    .bind(data.min_order_value)
    .bind(data.max_discount)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Voucher {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Voucher {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM voucher WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Voucher {id} not found")));
    }
    Ok(true)
}
