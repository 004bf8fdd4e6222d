//! Wire types for the backend's JSON contract.

use chrono::{DateTime, Utc};
use orderly_core::{
    DEFAULT_CURRENCY, LineItem, Money, OrderSnapshot, Settings, derive_fulfillment_status,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Envelope for `GET /settings`.
#[derive(Debug, Deserialize)]
pub(crate) struct SettingsEnvelope {
    pub settings: Settings,
}

/// Envelope for `GET /orders?order_gid=…`.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderLookupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order: Option<RemoteOrder>,
}

/// An order as returned by the backend lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrder {
    /// Line items on the order.
    #[serde(default)]
    pub line_items: Vec<RemoteLineItem>,
    /// When the order was placed.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Payment state. The lookup endpoint does not provide this yet; when
    /// absent the eligibility check on it is skipped.
    #[serde(default)]
    pub financial_status: Option<String>,
    /// Original subtotal, when the backend includes it.
    #[serde(default)]
    pub subtotal: Option<Money>,
    /// Original total tax, when the backend includes it.
    #[serde(default)]
    pub total_tax: Option<Money>,
}

/// A line item as returned by the backend lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLineItem {
    /// Line-item id, when the backend can resolve it.
    #[serde(default)]
    pub id: Option<String>,
    /// Product title.
    #[serde(default)]
    pub title: Option<String>,
    /// Quantity on the order.
    #[serde(default)]
    pub quantity: u32,
    /// Per-line fulfillment status (e.g. `fulfilled`, `unfulfilled`).
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    /// Unit price, when available.
    #[serde(default)]
    pub price: Option<Money>,
    /// Variant GID backing the line, when resolvable.
    #[serde(default)]
    pub variant_gid: Option<String>,
}

impl RemoteOrder {
    /// The snapshot the eligibility rules consume.
    ///
    /// The order-level fulfillment status is derived from the per-line
    /// statuses: `fulfilled` when all lines are, `unfulfilled` when none
    /// are, `partial` otherwise.
    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshot {
        let fulfillment_status = derive_fulfillment_status(
            self.line_items
                .iter()
                .filter_map(|item| item.fulfillment_status.as_deref()),
        )
        .map(|derived| derived.as_str().to_string());

        OrderSnapshot {
            created_at: self.created_at,
            financial_status: self.financial_status.clone(),
            fulfillment_status,
        }
    }

    /// The order's original subtotal.
    ///
    /// Falls back to summing the line items when the backend omits it, in
    /// the first line's currency (or the default currency for an order with
    /// no priced lines).
    #[must_use]
    pub fn original_subtotal(&self) -> Money {
        if let Some(subtotal) = &self.subtotal {
            return subtotal.clone();
        }

        let currency = self
            .line_items
            .iter()
            .find_map(|item| item.price.as_ref())
            .map_or(DEFAULT_CURRENCY, |price| price.currency_code.as_str());

        let amount = self
            .line_items
            .iter()
            .filter_map(|item| {
                item.price
                    .as_ref()
                    .map(|price| price.amount * rust_decimal::Decimal::from(item.quantity))
            })
            .sum();

        Money::new(amount, currency.to_string())
    }

    /// The order's original total tax, zero when the backend omits it.
    #[must_use]
    pub fn original_tax(&self) -> Money {
        self.total_tax
            .clone()
            .unwrap_or_else(|| Money::zero(&self.original_subtotal().currency_code))
    }

    /// Convert the listing into core line items for totals and payloads.
    ///
    /// Lines without an id cannot be addressed by an edit and are skipped
    /// with a warning; a missing price contributes zero to recomputed
    /// totals.
    #[must_use]
    pub fn to_line_items(&self) -> Vec<LineItem> {
        self.line_items
            .iter()
            .filter_map(|item| {
                let Some(id) = item.id.clone() else {
                    warn!("skipping line item without id in order lookup");
                    return None;
                };
                Some(LineItem {
                    id,
                    title: item.title.clone().unwrap_or_default(),
                    quantity: item.quantity,
                    price: item
                        .price
                        .clone()
                        .unwrap_or_else(|| Money::zero(DEFAULT_CURRENCY)),
                    variant_id: item.variant_gid.clone(),
                })
            })
            .collect()
    }
}

/// Address fields for the shipping/billing update endpoints.
///
/// Every field is always sent, blank when unknown, matching what the
/// backend's form handling expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub zip: String,
    pub phone: String,
    pub company: String,
}

/// Body for `POST /orders/shipping-address` and `/orders/billing-address`.
#[derive(Debug, Serialize)]
pub(crate) struct AddressUpdateRequest<'a> {
    pub order_gid: &'a str,
    #[serde(flatten)]
    pub address: &'a AddressInput,
}

/// Body for `POST /onboarding/complete-step`.
#[derive(Debug, Serialize)]
pub(crate) struct CompleteStepRequest {
    pub step_number: u32,
}
