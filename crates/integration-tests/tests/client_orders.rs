//! Integration tests for order lookup and edit submission.

use orderly_core::{QuantityOverrides, build_payload};
use orderly_integration_tests::{StubBackend, default_order};
use serde_json::json;

const ORDER_GID: &str = "gid://shopify/Order/1001";

// =============================================================================
// Order lookup
// =============================================================================

#[tokio::test]
async fn test_fetch_order_derives_snapshot() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    let snapshot = order.snapshot();

    assert!(snapshot.created_at.is_some());
    // Both default lines are unfulfilled.
    assert_eq!(snapshot.fulfillment_status.as_deref(), Some("unfulfilled"));
    // The lookup endpoint does not provide a financial status.
    assert!(snapshot.financial_status.is_none());
}

#[tokio::test]
async fn test_fetch_order_partial_fulfillment() {
    let backend = StubBackend::builder()
        .order_lookup(json!({
            "success": true,
            "order": {
                "createdAt": "2026-08-01T12:00:00Z",
                "lineItems": [
                    { "id": "L1", "quantity": 1, "fulfillmentStatus": "fulfilled" },
                    { "id": "L2", "quantity": 1, "fulfillmentStatus": "unfulfilled" }
                ]
            }
        }))
        .spawn()
        .await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    assert_eq!(
        order.snapshot().fulfillment_status.as_deref(),
        Some("partial")
    );
}

#[tokio::test]
async fn test_fetch_order_not_found() {
    let backend = StubBackend::builder()
        .order_lookup(json!({ "success": false }))
        .spawn()
        .await;
    let client = backend.client();

    let result = client.fetch_order(ORDER_GID).await;
    assert!(matches!(
        result,
        Err(orderly_client::ClientError::OrderNotFound(_))
    ));
}

// =============================================================================
// Edit submission
// =============================================================================

#[tokio::test]
async fn test_submit_edit_posts_cumulative_quantities() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    let line_items = order.to_line_items();

    let mut overrides = QuantityOverrides::new();
    overrides.set("L1", 6);

    let payload = build_payload(ORDER_GID, &line_items, &overrides, &[]);
    client.submit_edit(&payload).await.expect("submit edit");

    let recorded = backend.recorded();
    assert_eq!(recorded.order_posts.len(), 1);
    assert_eq!(
        recorded.order_posts[0],
        json!({
            "order_gid": ORDER_GID,
            "update_line_items": [
                {
                    "id": "L1",
                    "variant_gid": "gid://shopify/ProductVariant/1",
                    "quantity": 6
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_submit_noop_payload_carries_only_order_gid() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    let line_items = order.to_line_items();

    // Overrides identical to the original quantities.
    let mut overrides = QuantityOverrides::new();
    overrides.set("L1", 2);
    overrides.set("L2", 1);

    let payload = build_payload(ORDER_GID, &line_items, &overrides, &[]);
    assert!(payload.is_empty());

    client.submit_edit(&payload).await.expect("submit no-op");

    let recorded = backend.recorded();
    let body = recorded.order_posts[0]
        .as_object()
        .expect("payload is an object");
    assert_eq!(body.len(), 1);
    assert!(body.contains_key("order_gid"));
    assert!(!body.contains_key("update_line_items"));
    assert!(!body.contains_key("add_line_items"));
}

#[tokio::test]
async fn test_submit_edit_surfaces_backend_rejection() {
    let backend = StubBackend::builder().fail_orders().spawn().await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    let line_items = order.to_line_items();

    let mut overrides = QuantityOverrides::new();
    overrides.set("L1", 0);

    let payload = build_payload(ORDER_GID, &line_items, &overrides, &[]);
    let result = client.submit_edit(&payload).await;

    match result {
        Err(orderly_client::ClientError::Api { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("quantity exceeds available stock"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// =============================================================================
// Totals over the wire
// =============================================================================

#[tokio::test]
async fn test_remote_order_totals_round_trip() {
    let backend = StubBackend::builder().spawn().await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    let line_items = order.to_line_items();

    // No-op edit reproduces the order's own totals.
    let totals = orderly_core::compute_totals(
        &line_items,
        &QuantityOverrides::new(),
        &[],
        &order.original_subtotal(),
        &order.original_tax(),
    );

    assert_eq!(totals.subtotal.to_fixed(), "125.00");
    assert_eq!(totals.tax.to_fixed(), "12.50");
    assert_eq!(totals.total.to_fixed(), "137.50");
}

#[tokio::test]
async fn test_order_without_totals_falls_back_to_line_sum() {
    let mut order_body = default_order();
    order_body["subtotal"] = serde_json::Value::Null;
    order_body["totalTax"] = serde_json::Value::Null;

    let backend = StubBackend::builder()
        .order_lookup(json!({ "success": true, "order": order_body }))
        .spawn()
        .await;
    let client = backend.client();

    let order = client.fetch_order(ORDER_GID).await.expect("fetch order");
    assert_eq!(order.original_subtotal().to_fixed(), "125.00");
    assert_eq!(order.original_tax().to_fixed(), "0.00");
}
