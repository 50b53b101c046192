//! Pricing Engine
//!
//! Recomputes the authoritative price breakdown for a cart from catalog
//! truth. Every referenced product and option value is re-resolved; an
//! unresolvable reference fails the whole computation instead of being
//! skipped. Identical cart and catalog state always produce an identical
//! breakdown, so the engine is safe to call repeatedly for previews.

use super::{delivery, voucher};
use crate::db::repository::{self, RepoError};
use shared::error::AppError;
use shared::order::{CalculateRequest, PriceBreakdown};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

/// Pricing failure
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Product {id} is not valid or does not exist")]
    ProductNotFound { id: i64 },

    #[error("Option value {id} is not valid or does not exist")]
    OptionValueNotFound { id: i64 },

    #[error("Quantity {quantity} for product {product_id} must be at least 1")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    #[error("Voucher code '{code}' is not valid or no longer active")]
    VoucherNotFound { code: String },

    #[error("Order does not meet the minimum of {minimum} required by voucher '{code}'")]
    VoucherMinimumNotMet { code: String, minimum: i64 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        use shared::error::ErrorCode;
        let message = err.to_string();
        match err {
            PricingError::ProductNotFound { id } => {
                AppError::with_message(ErrorCode::ProductNotFound, message)
                    .with_detail("product_id", id)
            }
            PricingError::OptionValueNotFound { id } => {
                AppError::with_message(ErrorCode::OptionValueNotFound, message)
                    .with_detail("option_value_id", id)
            }
            PricingError::InvalidQuantity {
                product_id,
                quantity,
            } => AppError::with_message(ErrorCode::InvalidQuantity, message)
                .with_detail("product_id", product_id)
                .with_detail("quantity", quantity),
            PricingError::VoucherNotFound { code } => {
                AppError::with_message(ErrorCode::VoucherNotFound, message)
                    .with_detail("voucher_code", code)
            }
            PricingError::VoucherMinimumNotMet { code, minimum } => {
                AppError::with_message(ErrorCode::VoucherMinimumNotMet, message)
                    .with_detail("voucher_code", code)
                    .with_detail("minimum", minimum)
            }
            PricingError::Repo(repo) => repo.into(),
        }
    }
}

/// One selected option, priced and named for snapshotting
#[derive(Debug, Clone)]
pub struct PricedOption {
    pub group_name: String,
    pub value_name: String,
    pub added_price: i64,
}

/// One cart line, priced from catalog truth
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Base price plus selected option adjustments
    pub unit_price: i64,
    pub note: Option<String>,
    pub options: Vec<PricedOption>,
}

/// Fully priced cart: the breakdown plus the snapshot-ready lines
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub breakdown: PriceBreakdown,
    pub lines: Vec<PricedLine>,
    /// The voucher code to persist; set only when a discount was realized
    pub voucher_code: Option<String>,
}

/// The authoritative pricing computation
#[derive(Clone)]
pub struct PricingEngine {
    pool: SqlitePool,
}

impl PricingEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Price a cart for preview
    pub async fn calculate(
        &self,
        request: &CalculateRequest,
    ) -> Result<PriceBreakdown, PricingError> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        Ok(self.price(&mut conn, request).await?.breakdown)
    }

    /// Price a cart on an explicit connection.
    ///
    /// The order service calls this inside its submission transaction so
    /// pricing and persistence see one consistent catalog state.
    pub(crate) async fn price(
        &self,
        conn: &mut SqliteConnection,
        request: &CalculateRequest,
    ) -> Result<PricedOrder, PricingError> {
        // Distinct reference sets, one batched fetch each
        let mut product_ids: Vec<i64> = request.items.iter().map(|i| i.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();
        let mut option_ids: Vec<i64> = request
            .items
            .iter()
            .flat_map(|i| i.options.iter().copied())
            .collect();
        option_ids.sort_unstable();
        option_ids.dedup();

        let products = repository::product::find_by_ids(conn, &product_ids).await?;
        let option_values = repository::option_group::find_values_by_ids(conn, &option_ids).await?;

        let mut sub_total: i64 = 0;
        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            if item.quantity < 1 {
                return Err(PricingError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
            let product = products
                .get(&item.product_id)
                .ok_or(PricingError::ProductNotFound {
                    id: item.product_id,
                })?;

            let mut unit_price = product.base_price;
            let mut options = Vec::with_capacity(item.options.len());
            for value_id in &item.options {
                let value =
                    option_values
                        .get(value_id)
                        .ok_or(PricingError::OptionValueNotFound { id: *value_id })?;
                unit_price += value.price_adjustment;
                options.push(PricedOption {
                    group_name: value.group_name.clone(),
                    value_name: value.name.clone(),
                    added_price: value.price_adjustment,
                });
            }

            sub_total += unit_price * item.quantity;
            lines.push(PricedLine {
                product_id: item.product_id,
                product_name: product.name.clone(),
                quantity: item.quantity,
                unit_price,
                note: item.note.clone(),
                options,
            });
        }

        let delivery_fee = delivery::fee(request.delivery_method, sub_total);

        let mut discount_amount: i64 = 0;
        let mut applied_voucher = None;
        if let Some(code) = &request.voucher_code {
            let row = repository::voucher::find_active_by_code(conn, code)
                .await?
                .ok_or_else(|| PricingError::VoucherNotFound { code: code.clone() })?;
            discount_amount = voucher::resolve(&row, sub_total)?;
            // An accepted code with zero effect is not recorded on the order
            if discount_amount > 0 {
                applied_voucher = Some(code.clone());
            }
        }

        let total_amount = (sub_total + delivery_fee - discount_amount).max(0);

        Ok(PricedOrder {
            breakdown: PriceBreakdown {
                sub_total,
                delivery_fee,
                discount_amount,
                total_amount,
            },
            lines,
            voucher_code: applied_voucher,
        })
    }
}
