//! Cart persistence and the checkout failure path, end to end.
//!
//! Run with: cargo test -p kiogloss-integration-tests

use kiogloss_client::models::catalog::ProductSummary;
use kiogloss_client::storage::keys;
use kiogloss_client::{CheckoutError, PaymentConfirmation};
use kiogloss_core::{AccountId, Price, ProductId};
use kiogloss_integration_tests::{offline_storefront, raw_state};
use rust_decimal::Decimal;

fn gloss() -> ProductSummary {
    ProductSummary {
        id: ProductId::new(7),
        image: "rose-gloss.webp".to_owned(),
        title: "Rose Gloss".to_owned(),
        slug: "rose-gloss".to_owned(),
        sizes: vec!["5ml".to_owned(), "10ml".to_owned()],
        colors: vec!["rose".to_owned()],
        price: Price::new(Decimal::new(1250, 2)),
        stock: 30,
    }
}

#[tokio::test]
async fn test_cart_survives_restart_with_variants_intact() {
    let dir = tempfile::tempdir().expect("tempdir");

    let storefront = offline_storefront(dir.path());
    storefront.cart.add_item(&gloss(), 2, None, None);
    storefront
        .cart
        .add_item(&gloss(), 1, Some("10ml".to_owned()), None);

    let restarted = offline_storefront(dir.path());
    let lines = restarted.cart.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(restarted.cart.item_count(), 3);
    assert_eq!(restarted.cart.total(), Decimal::new(3750, 2));
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart_for_retry() {
    let dir = tempfile::tempdir().expect("tempdir");

    let storefront = offline_storefront(dir.path());
    storefront.cart.add_item(&gloss(), 2, None, None);

    let confirmation = PaymentConfirmation {
        capture_id: "CAP-777".to_owned(),
        amount: Decimal::new(2500, 2),
    };
    let result = storefront
        .checkout
        .complete(Some(AccountId::new(14)), &storefront.cart, &confirmation)
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::Reconciliation { .. })
    ));

    // Both the live cart and its persisted copy are untouched.
    assert_eq!(storefront.cart.item_count(), 2);
    assert!(raw_state(dir.path(), keys::CART).is_some());
}

#[tokio::test]
async fn test_clearing_the_cart_clears_storage() {
    let dir = tempfile::tempdir().expect("tempdir");

    let storefront = offline_storefront(dir.path());
    storefront.cart.add_item(&gloss(), 1, None, None);
    assert!(raw_state(dir.path(), keys::CART).is_some());

    storefront.cart.clear();
    assert!(raw_state(dir.path(), keys::CART).is_none());
}
