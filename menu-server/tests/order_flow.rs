//! End-to-end order flow tests over a real SQLite database.

use menu_server::db::repository;
use menu_server::db::seed::seed_demo_catalog;
use menu_server::{Config, OrderError, PricingError, ServerState};
use shared::message::MenuEvent;
use shared::models::{
    CategoryCreate, DeliveryMethod, OptionGroupCreate, OptionValueCreate, OrderStatus,
    PaymentMethod, ProductCreate, ProductUpdate, SelectionType, VoucherCreate, VoucherKind,
};
use shared::order::{CalculateRequest, CartItem, CreateOrderRequest};

async fn setup() -> (ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_str().unwrap());
    let state = ServerState::init(config).await.expect("server state");
    (state, dir)
}

/// Minimal fixture: a Latte (30000) with a Size group (Large +5000, Small 0)
struct Fixture {
    latte_id: i64,
    large_id: i64,
    small_id: i64,
    size_group_id: i64,
}

async fn seed_latte(state: &ServerState) -> Fixture {
    let pool = &state.db.pool;
    let drinks = repository::category::create(
        pool,
        CategoryCreate {
            name: "Drinks".into(),
            sort_order: Some(1),
        },
    )
    .await
    .unwrap();

    let latte = repository::product::create(
        pool,
        ProductCreate {
            name: "Latte".into(),
            description: None,
            base_price: 30_000,
            image_url: None,
            is_best_seller: None,
            is_out_of_stock: None,
            sort_order: Some(1),
            category_id: drinks.id,
        },
    )
    .await
    .unwrap();

    let size = repository::option_group::create(
        pool,
        OptionGroupCreate {
            name: "Size".into(),
            selection: SelectionType::Single,
            display_order: Some(1),
        },
    )
    .await
    .unwrap();
    let small = repository::option_group::create_value(
        pool,
        size.id,
        OptionValueCreate {
            name: "Small".into(),
            price_adjustment: 0,
            is_out_of_stock: None,
        },
    )
    .await
    .unwrap();
    let large = repository::option_group::create_value(
        pool,
        size.id,
        OptionValueCreate {
            name: "Large".into(),
            price_adjustment: 5_000,
            is_out_of_stock: None,
        },
    )
    .await
    .unwrap();
    repository::product::set_option_groups(pool, latte.id, &[size.id])
        .await
        .unwrap();

    Fixture {
        latte_id: latte.id,
        large_id: large.id,
        small_id: small.id,
        size_group_id: size.id,
    }
}

fn cart(items: Vec<CartItem>, delivery: DeliveryMethod, voucher: Option<&str>) -> CalculateRequest {
    CalculateRequest {
        items,
        delivery_method: delivery,
        voucher_code: voucher.map(str::to_string),
    }
}

fn order_request(cart: CalculateRequest) -> CreateOrderRequest {
    CreateOrderRequest {
        cart,
        customer_name: "Alex Tran".into(),
        customer_phone: "0900000001".into(),
        customer_address: "12 Riverside".into(),
        customer_note: None,
        payment_method: PaymentMethod::Cash,
    }
}

async fn count(pool: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_end_to_end_latte_scenario() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    // (30000 + 5000) * 2 = 70000; standard delivery free from 50000
    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 2,
            options: vec![fx.large_id],
            note: Some("less ice".into()),
        }],
        DeliveryMethod::Standard,
        None,
    );

    let breakdown = state.pricing.calculate(&request).await.unwrap();
    assert_eq!(breakdown.sub_total, 70_000);
    assert_eq!(breakdown.delivery_fee, 0);
    assert_eq!(breakdown.discount_amount, 0);
    assert_eq!(breakdown.total_amount, 70_000);

    let confirmation = state.orders.submit(&order_request(request)).await.unwrap();
    assert_eq!(confirmation.status, OrderStatus::New);
    assert_eq!(confirmation.total_amount, 70_000);

    let detail = state.orders.detail(confirmation.id).await.unwrap();
    assert_eq!(detail.order.sub_total, 70_000);
    assert_eq!(detail.order.voucher_code, None);
    assert_eq!(detail.items.len(), 1);
    let line = &detail.items[0];
    assert_eq!(line.item.product_name, "Latte");
    assert_eq!(line.item.quantity, 2);
    assert_eq!(line.item.unit_price, 35_000);
    assert_eq!(line.item.note.as_deref(), Some("less ice"));
    assert_eq!(line.options.len(), 1);
    assert_eq!(line.options[0].group_name, "Size");
    assert_eq!(line.options[0].value_name, "Large");
    assert_eq!(line.options[0].added_price, 5_000);
}

#[tokio::test]
async fn test_calculate_is_idempotent_and_fee_applies_below_threshold() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 1,
            options: vec![fx.small_id],
            note: None,
        }],
        DeliveryMethod::Standard,
        None,
    );

    let first = state.pricing.calculate(&request).await.unwrap();
    let second = state.pricing.calculate(&request).await.unwrap();
    assert_eq!(first, second);

    // 30000 < 50000, so the standard fee applies
    assert_eq!(first.sub_total, 30_000);
    assert_eq!(first.delivery_fee, 15_000);
    assert_eq!(first.discount_amount, 0);
    assert_eq!(first.total_amount, first.sub_total + first.delivery_fee);
}

#[tokio::test]
async fn test_fast_delivery_is_never_free() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 3,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Fast,
        None,
    );

    let breakdown = state.pricing.calculate(&request).await.unwrap();
    assert_eq!(breakdown.sub_total, 90_000);
    assert_eq!(breakdown.delivery_fee, 25_000);
}

#[tokio::test]
async fn test_percentage_voucher_is_capped() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    repository::voucher::create(
        &state.db.pool,
        VoucherCreate {
            code: "HALF".into(),
            description: None,
            kind: VoucherKind::Percentage,
            value: 50.0,
            min_order_value: None,
            max_discount: Some(10_000),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 1,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Standard,
        Some("HALF"),
    );

    // Raw discount 15000, capped to 10000
    let breakdown = state.pricing.calculate(&request).await.unwrap();
    assert_eq!(breakdown.sub_total, 30_000);
    assert_eq!(breakdown.discount_amount, 10_000);
    assert_eq!(breakdown.total_amount, 30_000 + 15_000 - 10_000);
}

#[tokio::test]
async fn test_voucher_below_minimum_is_rejected_not_zeroed() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    repository::voucher::create(
        &state.db.pool,
        VoucherCreate {
            code: "BIGSPENDER".into(),
            description: None,
            kind: VoucherKind::Fixed,
            value: 20_000.0,
            min_order_value: Some(50_000),
            max_discount: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 1,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Standard,
        Some("BIGSPENDER"),
    );

    let err = state.pricing.calculate(&request).await.unwrap_err();
    match err {
        PricingError::VoucherMinimumNotMet { minimum, .. } => assert_eq!(minimum, 50_000),
        other => panic!("unexpected error: {other:?}"),
    }

    // Submission fails the same way and writes nothing
    let err = state.orders.submit(&order_request(request)).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Pricing(PricingError::VoucherMinimumNotMet { .. })
    ));
    assert_eq!(count(&state.db.pool, "orders").await, 0);
}

#[tokio::test]
async fn test_unknown_or_inactive_voucher_code_fails() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    repository::voucher::create(
        &state.db.pool,
        VoucherCreate {
            code: "EXPIRED".into(),
            description: None,
            kind: VoucherKind::Fixed,
            value: 5_000.0,
            min_order_value: None,
            max_discount: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    for code in ["NOSUCHCODE", "EXPIRED"] {
        let request = cart(
            vec![CartItem {
                product_id: fx.latte_id,
                quantity: 1,
                options: vec![],
                note: None,
            }],
            DeliveryMethod::Standard,
            Some(code),
        );
        let err = state.pricing.calculate(&request).await.unwrap_err();
        assert!(
            matches!(err, PricingError::VoucherNotFound { .. }),
            "expected VoucherNotFound for {code}, got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_unknown_product_fails_calculate_and_submit() {
    let (state, _dir) = setup().await;
    seed_latte(&state).await;

    let request = cart(
        vec![CartItem {
            product_id: 999_999,
            quantity: 1,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Standard,
        None,
    );

    let err = state.pricing.calculate(&request).await.unwrap_err();
    assert!(matches!(err, PricingError::ProductNotFound { id: 999_999 }));

    let err = state.orders.submit(&order_request(request)).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Pricing(PricingError::ProductNotFound { .. })
    ));
    assert_eq!(count(&state.db.pool, "orders").await, 0);
}

#[tokio::test]
async fn test_submission_atomicity_on_invalid_option() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    // First line is valid; the second references a bogus option value
    let request = cart(
        vec![
            CartItem {
                product_id: fx.latte_id,
                quantity: 2,
                options: vec![fx.large_id],
                note: None,
            },
            CartItem {
                product_id: fx.latte_id,
                quantity: 1,
                options: vec![123_456_789],
                note: None,
            },
        ],
        DeliveryMethod::Standard,
        None,
    );

    let err = state.orders.submit(&order_request(request)).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Pricing(PricingError::OptionValueNotFound { id: 123_456_789 })
    ));

    // All-or-nothing: no order, no items, no item options
    assert_eq!(count(&state.db.pool, "orders").await, 0);
    assert_eq!(count(&state.db.pool, "order_item").await, 0);
    assert_eq!(count(&state.db.pool, "order_item_option").await, 0);
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 0,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Standard,
        None,
    );

    let err = state.pricing.calculate(&request).await.unwrap_err();
    assert!(matches!(err, PricingError::InvalidQuantity { quantity: 0, .. }));
}

#[tokio::test]
async fn test_empty_cart_cannot_be_submitted() {
    let (state, _dir) = setup().await;
    seed_latte(&state).await;

    let request = cart(vec![], DeliveryMethod::Standard, None);
    let err = state.orders.submit(&order_request(request)).await.unwrap_err();
    assert!(matches!(err, OrderError::Empty));
}

#[tokio::test]
async fn test_zero_effect_voucher_is_not_recorded() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    repository::voucher::create(
        &state.db.pool,
        VoucherCreate {
            code: "NOTHING".into(),
            description: None,
            kind: VoucherKind::Fixed,
            value: 0.0,
            min_order_value: None,
            max_discount: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 1,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Standard,
        Some("NOTHING"),
    );

    let confirmation = state.orders.submit(&order_request(request)).await.unwrap();
    let detail = state.orders.detail(confirmation.id).await.unwrap();
    assert_eq!(detail.order.discount_amount, 0);
    // Accepted but zero-effect code is not persisted on the order
    assert_eq!(detail.order.voucher_code, None);
}

#[tokio::test]
async fn test_order_snapshots_survive_catalog_edits() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 1,
            options: vec![fx.large_id],
            note: None,
        }],
        DeliveryMethod::Standard,
        None,
    );
    let confirmation = state.orders.submit(&order_request(request)).await.unwrap();

    // Rename and reprice the product, then delete the whole option group
    repository::product::update(
        &state.db.pool,
        fx.latte_id,
        ProductUpdate {
            name: Some("Oat Latte".into()),
            base_price: Some(99_000),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repository::option_group::delete(&state.db.pool, fx.size_group_id)
        .await
        .unwrap();

    let detail = state.orders.detail(confirmation.id).await.unwrap();
    assert_eq!(detail.order.total_amount, 50_000);
    assert_eq!(detail.items[0].item.product_name, "Latte");
    assert_eq!(detail.items[0].item.unit_price, 35_000);
    assert_eq!(detail.items[0].options[0].value_name, "Large");
}

#[tokio::test]
async fn test_submit_and_status_change_publish_events() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    let mut rx = state.events.subscribe();

    let request = cart(
        vec![CartItem {
            product_id: fx.latte_id,
            quantity: 2,
            options: vec![],
            note: None,
        }],
        DeliveryMethod::Fast,
        None,
    );
    let confirmation = state.orders.submit(&order_request(request)).await.unwrap();

    match rx.recv().await.unwrap() {
        MenuEvent::NewOrder(event) => {
            assert_eq!(event.order_id, confirmation.id);
            assert_eq!(event.total_amount, 60_000 + 25_000);
            assert_eq!(event.status, OrderStatus::New);
            assert_eq!(event.customer_name, "Alex Tran");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let updated = state
        .orders
        .set_status(confirmation.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Confirmed);

    match rx.recv().await.unwrap() {
        MenuEvent::OrderStatusUpdated { order_id, status, .. } => {
            assert_eq!(order_id, confirmation.id);
            assert_eq!(status, OrderStatus::Confirmed);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    // Permissive machine: even a terminal-looking state can be left again
    let reopened = state
        .orders
        .set_status(confirmation.id, OrderStatus::New)
        .await
        .unwrap();
    assert_eq!(reopened.status, OrderStatus::New);

    let err = state
        .orders
        .set_status(424_242, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { id: 424_242 }));
}

#[tokio::test]
async fn test_order_list_is_newest_first() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let request = cart(
            vec![CartItem {
                product_id: fx.latte_id,
                quantity: 1,
                options: vec![],
                note: None,
            }],
            DeliveryMethod::Standard,
            None,
        );
        ids.push(state.orders.submit(&order_request(request)).await.unwrap().id);
    }

    let listed: Vec<i64> = state.orders.list().await.unwrap().iter().map(|o| o.id).collect();
    ids.sort_unstable();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_patch_updates_touch_only_named_fields() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    let updated = repository::product::update(
        &state.db.pool,
        fx.latte_id,
        ProductUpdate {
            base_price: Some(32_000),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.base_price, 32_000);
    assert_eq!(updated.name, "Latte");
    assert!(!updated.is_best_seller);
}

#[tokio::test]
async fn test_option_group_delete_cascades() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;

    repository::option_group::delete(&state.db.pool, fx.size_group_id)
        .await
        .unwrap();

    assert_eq!(count(&state.db.pool, "option_value").await, 0);
    assert_eq!(count(&state.db.pool, "product_option_group").await, 0);
    assert!(
        repository::option_group::find_by_id(&state.db.pool, fx.size_group_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_category_delete_cascades_to_products() {
    let (state, _dir) = setup().await;
    let fx = seed_latte(&state).await;
    let category_id = repository::product::find_by_id(&state.db.pool, fx.latte_id)
        .await
        .unwrap()
        .unwrap()
        .category_id;

    repository::category::delete(&state.db.pool, category_id)
        .await
        .unwrap();

    assert_eq!(count(&state.db.pool, "product").await, 0);
    assert_eq!(count(&state.db.pool, "product_option_group").await, 0);
    // The option group library itself is untouched
    assert_eq!(count(&state.db.pool, "option_group").await, 1);
}

#[tokio::test]
async fn test_duplicate_voucher_code_is_a_conflict() {
    let (state, _dir) = setup().await;

    let create = VoucherCreate {
        code: "ONCE".into(),
        description: None,
        kind: VoucherKind::Fixed,
        value: 1_000.0,
        min_order_value: None,
        max_discount: None,
        is_active: None,
    };
    repository::voucher::create(&state.db.pool, create.clone())
        .await
        .unwrap();

    let err = repository::voucher::create(&state.db.pool, create)
        .await
        .unwrap_err();
    assert!(matches!(err, repository::RepoError::Duplicate(_)));
}

#[tokio::test]
async fn test_demo_menu_assembles_nested_and_ordered() {
    let (state, _dir) = setup().await;
    assert!(seed_demo_catalog(&state.db.pool).await.unwrap());
    // Second run is a no-op
    assert!(!seed_demo_catalog(&state.db.pool).await.unwrap());

    let menu = state.catalog.menu().await.unwrap();
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0].name, "Milk Tea");
    assert_eq!(menu[1].name, "Coffee");

    let matcha = &menu[0].products[0];
    assert_eq!(matcha.name, "Matcha Milk Tea");
    assert!(matcha.is_best_seller);
    let group_names: Vec<&str> = matcha
        .option_groups
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(group_names, ["Sweetness", "Size", "Toppings"]);
    assert_eq!(matcha.option_groups[2].values.len(), 2);

    let coffee = &menu[1].products[0];
    assert_eq!(coffee.option_groups.len(), 1);
    assert_eq!(coffee.option_groups[0].name, "Sweetness");
}
