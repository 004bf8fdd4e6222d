//! Integration tests for address updates and optimistic rollback.

use orderly_client::{AddressInput, OptimisticAddress, UpdatePhase};
use orderly_integration_tests::StubBackend;
use serde_json::json;

const ORDER_GID: &str = "gid://shopify/Order/1001";

fn new_address() -> AddressInput {
    AddressInput {
        first_name: "Ada".to_string(),
        last_name: "Rahman".to_string(),
        address1: "12 Lake Road".to_string(),
        city: "Dhaka".to_string(),
        country: "BD".to_string(),
        zip: "1207".to_string(),
        ..AddressInput::default()
    }
}

#[tokio::test]
async fn test_shipping_update_posts_flat_body() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    client
        .update_shipping_address(ORDER_GID, &new_address())
        .await
        .expect("update shipping address");

    let recorded = backend.recorded();
    assert_eq!(recorded.shipping_posts.len(), 1);
    let body = &recorded.shipping_posts[0];
    assert_eq!(body["order_gid"], ORDER_GID);
    assert_eq!(body["first_name"], "Ada");
    assert_eq!(body["city"], "Dhaka");
    // Blank fields are still sent.
    assert_eq!(body["company"], "");
}

#[tokio::test]
async fn test_billing_update_uses_billing_endpoint() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    client
        .update_billing_address(ORDER_GID, &new_address())
        .await
        .expect("update billing address");

    let recorded = backend.recorded();
    assert_eq!(recorded.billing_posts.len(), 1);
    assert!(recorded.shipping_posts.is_empty());
}

#[tokio::test]
async fn test_optimistic_update_applies_then_commits() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    let mut state = OptimisticAddress::default();
    client
        .update_shipping_address_optimistic(&mut state, ORDER_GID, new_address())
        .await
        .expect("optimistic update");

    assert_eq!(state.phase(), UpdatePhase::Applied);
    assert_eq!(state.current().map(|a| a.city.as_str()), Some("Dhaka"));
}

#[tokio::test]
async fn test_failed_update_rolls_back_to_previous_address() {
    let backend = StubBackend::builder().fail_shipping().spawn().await;
    let client = backend.client();

    let previous = AddressInput {
        city: "Chattogram".to_string(),
        ..AddressInput::default()
    };
    let mut state = OptimisticAddress::with_current(Some(previous));

    let result = client
        .update_shipping_address_optimistic(&mut state, ORDER_GID, new_address())
        .await;

    assert!(result.is_err(), "error is rethrown for the caller");
    assert_eq!(state.phase(), UpdatePhase::RolledBack);
    assert_eq!(
        state.current().map(|a| a.city.as_str()),
        Some("Chattogram"),
        "observable state reverts to its pre-update value"
    );

    // The request did reach the backend before failing.
    assert_eq!(backend.recorded().shipping_posts.len(), 1);
}

#[tokio::test]
async fn test_failed_update_with_no_previous_address_clears_state() {
    let backend = StubBackend::builder().fail_shipping().spawn().await;
    let client = backend.client();

    let mut state = OptimisticAddress::default();
    let result = client
        .update_shipping_address_optimistic(&mut state, ORDER_GID, new_address())
        .await;

    assert!(result.is_err());
    assert!(state.current().is_none(), "reset to null on rollback");
    let recorded = backend.recorded();
    assert_eq!(recorded.shipping_posts[0]["order_gid"], json!(ORDER_GID));
}
