//! Demo catalog seed
//!
//! Inserts a small bubble-tea menu for fresh deployments and tests.
//! Skipped when the catalog already has content.

use super::repository::{self, RepoResult};
use shared::models::{
    CategoryCreate, OptionGroupCreate, OptionValueCreate, ProductCreate, SelectionType,
    VoucherCreate, VoucherKind,
};
use sqlx::SqlitePool;

/// Seed the demo catalog. Returns true when data was inserted.
pub async fn seed_demo_catalog(pool: &SqlitePool) -> RepoResult<bool> {
    if !repository::category::find_all(pool).await?.is_empty() {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(false);
    }

    let milk_tea = repository::category::create(
        pool,
        CategoryCreate {
            name: "Milk Tea".into(),
            sort_order: Some(1),
        },
    )
    .await?;
    let coffee = repository::category::create(
        pool,
        CategoryCreate {
            name: "Coffee".into(),
            sort_order: Some(2),
        },
    )
    .await?;

    let matcha = repository::product::create(
        pool,
        ProductCreate {
            name: "Matcha Milk Tea".into(),
            description: Some("Japanese green tea".into()),
            base_price: 35_000,
            image_url: None,
            is_best_seller: Some(true),
            is_out_of_stock: None,
            sort_order: Some(1),
            category_id: milk_tea.id,
        },
    )
    .await?;
    let black_coffee = repository::product::create(
        pool,
        ProductCreate {
            name: "Black Coffee".into(),
            description: Some("Drip coffee".into()),
            base_price: 20_000,
            image_url: None,
            is_best_seller: None,
            is_out_of_stock: None,
            sort_order: Some(1),
            category_id: coffee.id,
        },
    )
    .await?;

    let sweetness = repository::option_group::create(
        pool,
        OptionGroupCreate {
            name: "Sweetness".into(),
            selection: SelectionType::Single,
            display_order: Some(1),
        },
    )
    .await?;
    for (name, adjustment) in [("100% sugar", 0), ("50% sugar", 0)] {
        repository::option_group::create_value(
            pool,
            sweetness.id,
            OptionValueCreate {
                name: name.into(),
                price_adjustment: adjustment,
                is_out_of_stock: None,
            },
        )
        .await?;
    }

    let size = repository::option_group::create(
        pool,
        OptionGroupCreate {
            name: "Size".into(),
            selection: SelectionType::Single,
            display_order: Some(2),
        },
    )
    .await?;
    for (name, adjustment) in [("Medium (M)", 0), ("Large (L)", 5_000)] {
        repository::option_group::create_value(
            pool,
            size.id,
            OptionValueCreate {
                name: name.into(),
                price_adjustment: adjustment,
                is_out_of_stock: None,
            },
        )
        .await?;
    }

    let toppings = repository::option_group::create(
        pool,
        OptionGroupCreate {
            name: "Toppings".into(),
            selection: SelectionType::Multi,
            display_order: Some(3),
        },
    )
    .await?;
    for (name, adjustment) in [("Coconut jelly", 5_000), ("Black pearls", 7_000)] {
        repository::option_group::create_value(
            pool,
            toppings.id,
            OptionValueCreate {
                name: name.into(),
                price_adjustment: adjustment,
                is_out_of_stock: None,
            },
        )
        .await?;
    }

    repository::product::set_option_groups(
        pool,
        matcha.id,
        &[size.id, toppings.id, sweetness.id],
    )
    .await?;
    repository::product::set_option_groups(pool, black_coffee.id, &[sweetness.id]).await?;

    repository::voucher::create(
        pool,
        VoucherCreate {
            code: "WELCOME10".into(),
            description: Some("10% off, capped".into()),
            kind: VoucherKind::Percentage,
            value: 10.0,
            min_order_value: Some(30_000),
            max_discount: Some(10_000),
            is_active: Some(true),
        },
    )
    .await?;

    tracing::info!("Demo catalog seeded");
    Ok(true)
}
