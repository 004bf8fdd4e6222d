//! Test support: an in-process stub of the Orderly backend.
//!
//! Serves the endpoints the client consumes (`/settings`, `/orders`,
//! `/orders/*-address`, `/onboarding/complete-step`) from canned JSON,
//! records every request body it receives, and can be told to fail specific
//! endpoints so rollback paths can be exercised.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use orderly_client::{ClientConfig, OrderlyClient};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// Everything the stub backend has seen so far.
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    /// Bodies posted to `/orders`.
    pub order_posts: Vec<Value>,
    /// Bodies posted to `/orders/shipping-address`.
    pub shipping_posts: Vec<Value>,
    /// Bodies posted to `/orders/billing-address`.
    pub billing_posts: Vec<Value>,
    /// Bodies posted to `/onboarding/complete-step`.
    pub onboarding_posts: Vec<Value>,
    /// Number of `GET /settings` requests.
    pub settings_gets: usize,
    /// Number of `GET /orders` requests.
    pub order_gets: usize,
}

#[derive(Clone)]
struct StubState {
    settings_body: Value,
    order_body: Value,
    fail_shipping: bool,
    fail_orders: bool,
    recorded: Arc<Mutex<Recorded>>,
}

/// Configuration for a [`StubBackend`].
pub struct StubBackendBuilder {
    settings_body: Value,
    order_body: Value,
    fail_shipping: bool,
    fail_orders: bool,
}

impl StubBackendBuilder {
    /// Response body for `GET /settings`.
    #[must_use]
    pub fn settings(mut self, settings: Value) -> Self {
        self.settings_body = json!({ "settings": settings });
        self
    }

    /// Full response body for `GET /orders` (including the `success` flag).
    #[must_use]
    pub fn order_lookup(mut self, body: Value) -> Self {
        self.order_body = body;
        self
    }

    /// Make `POST /orders/shipping-address` fail with a 500.
    #[must_use]
    pub const fn fail_shipping(mut self) -> Self {
        self.fail_shipping = true;
        self
    }

    /// Make `POST /orders` fail with a 422.
    #[must_use]
    pub const fn fail_orders(mut self) -> Self {
        self.fail_orders = true;
        self
    }

    /// Bind to an ephemeral port and start serving.
    pub async fn spawn(self) -> StubBackend {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = StubState {
            settings_body: self.settings_body,
            order_body: self.order_body,
            fail_shipping: self.fail_shipping,
            fail_orders: self.fail_orders,
            recorded: Arc::clone(&recorded),
        };

        let app = Router::new()
            .route("/settings", get(get_settings))
            .route("/orders", get(get_order).post(post_order))
            .route("/orders/shipping-address", post(post_shipping_address))
            .route("/orders/billing-address", post(post_billing_address))
            .route("/onboarding/complete-step", post(post_complete_step))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend local addr");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub backend");
        });

        StubBackend {
            base_url: format!("http://{addr}"),
            recorded,
            handle,
        }
    }
}

/// A running stub backend.
pub struct StubBackend {
    /// Base URL to point the client at.
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Start building a stub with a permissive default configuration.
    #[must_use]
    pub fn builder() -> StubBackendBuilder {
        StubBackendBuilder {
            settings_body: json!({ "settings": default_settings() }),
            order_body: json!({ "success": true, "order": default_order() }),
            fail_shipping: false,
            fail_orders: false,
        }
    }

    /// A client configured against this stub.
    #[must_use]
    pub fn client(&self) -> OrderlyClient {
        let config = ClientConfig::new(&self.base_url, SecretString::from("test-session-token"))
            .expect("stub base url");
        OrderlyClient::new(&config)
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn recorded(&self) -> Recorded {
        self.recorded
            .lock()
            .expect("recorded lock")
            .clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Settings that allow everything, for tests not exercising eligibility.
#[must_use]
pub fn default_settings() -> Value {
    json!({
        "enable_order_editing": true,
        "edit_time_window": 0,
        "safe_financial_statuses": [],
        "safe_fulfillment_statuses": [],
        "allowed_edit_types": ["items", "shipping"],
        "who_can_edit": ["all"],
        "notify_on_edit": false
    })
}

/// A two-line unfulfilled order.
#[must_use]
pub fn default_order() -> Value {
    json!({
        "createdAt": "2026-08-01T12:00:00Z",
        "lineItems": [
            {
                "id": "L1",
                "title": "Ceramic mug",
                "quantity": 2,
                "fulfillmentStatus": "unfulfilled",
                "price": { "amount": "50.00", "currencyCode": "USD" },
                "variantGid": "gid://shopify/ProductVariant/1"
            },
            {
                "id": "L2",
                "title": "Tea sampler",
                "quantity": 1,
                "fulfillmentStatus": "unfulfilled",
                "price": { "amount": "25.00", "currencyCode": "USD" },
                "variantGid": "gid://shopify/ProductVariant/2"
            }
        ],
        "subtotal": { "amount": "125.00", "currencyCode": "USD" },
        "totalTax": { "amount": "12.50", "currencyCode": "USD" }
    })
}

async fn get_settings(State(state): State<StubState>) -> Json<Value> {
    state.recorded.lock().expect("recorded lock").settings_gets += 1;
    Json(state.settings_body.clone())
}

async fn get_order(
    State(state): State<StubState>,
    Query(_params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.recorded.lock().expect("recorded lock").order_gets += 1;
    Json(state.order_body.clone())
}

async fn post_order(State(state): State<StubState>, Json(body): Json<Value>) -> impl IntoResponse {
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .order_posts
        .push(body);

    if state.fail_orders {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "quantity exceeds available stock" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "success": true })))
    }
}

async fn post_shipping_address(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .shipping_posts
        .push(body);

    if state.fail_shipping {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "address service unavailable" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "success": true })))
    }
}

async fn post_billing_address(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .billing_posts
        .push(body);
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn post_complete_step(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .onboarding_posts
        .push(body);
    (StatusCode::OK, Json(json!({ "success": true })))
}
