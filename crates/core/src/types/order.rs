//! Order, line-item and variant types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Product or variant image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// The slice of order state the eligibility rules look at.
///
/// `financial_status` and `fulfillment_status` are optional because not every
/// source provides them; a missing status skips the corresponding check.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
    /// Payment state (e.g. `PAID`, `PENDING`).
    pub financial_status: Option<String>,
    /// Shipment state (e.g. `fulfilled`, `partial`).
    pub fulfillment_status: Option<String>,
}

/// An existing line on the placed order.
///
/// Read-only source of truth: pending quantity edits live in a separate
/// [`QuantityOverrides`](crate::edit::QuantityOverrides) map, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque line-item identifier, stable within the order.
    pub id: String,
    /// Product title for display.
    #[serde(default)]
    pub title: String,
    /// Quantity on the placed order.
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
    /// Variant GID, when the backend can resolve it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// A purchasable variant together with its parent product, as returned by
/// product search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithProduct {
    /// Variant GID.
    pub variant_id: String,
    /// Variant title (e.g. "Large / Blue").
    pub variant_title: String,
    /// Parent product GID.
    pub product_id: String,
    /// Parent product title.
    pub product_title: String,
    /// Unit price.
    pub price: Money,
    /// Whether the variant can currently be purchased.
    #[serde(default)]
    pub available_for_sale: bool,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Variant or product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// A variant the customer picked to add to the order, not yet part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedVariant {
    /// The variant being added.
    pub variant: VariantWithProduct,
    /// How many units to add.
    pub quantity: u32,
}

/// Order-level fulfillment state derived from a line-item listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedFulfillment {
    /// Every line item is fulfilled.
    Fulfilled,
    /// No line item is fulfilled.
    Unfulfilled,
    /// Some line items are fulfilled, some are not.
    Partial,
}

impl DerivedFulfillment {
    /// The status string the eligibility rules compare against.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fulfilled => "fulfilled",
            Self::Unfulfilled => "unfulfilled",
            Self::Partial => "partial",
        }
    }
}

impl std::fmt::Display for DerivedFulfillment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the order-level fulfillment status from per-line statuses.
///
/// `fulfilled` when every line is fulfilled, `unfulfilled` when every line is
/// unfulfilled, `partial` otherwise. Returns `None` for an empty listing.
/// Comparison is case-insensitive.
pub fn derive_fulfillment_status<'a, I>(statuses: I) -> Option<DerivedFulfillment>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut any = false;
    let mut all_fulfilled = true;
    let mut all_unfulfilled = true;

    for status in statuses {
        any = true;
        if status.eq_ignore_ascii_case("fulfilled") {
            all_unfulfilled = false;
        } else if status.eq_ignore_ascii_case("unfulfilled") {
            all_fulfilled = false;
        } else {
            all_fulfilled = false;
            all_unfulfilled = false;
        }
    }

    if !any {
        return None;
    }
    Some(if all_fulfilled {
        DerivedFulfillment::Fulfilled
    } else if all_unfulfilled {
        DerivedFulfillment::Unfulfilled
    } else {
        DerivedFulfillment::Partial
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_all_fulfilled() {
        let derived = derive_fulfillment_status(["fulfilled", "FULFILLED"]);
        assert_eq!(derived, Some(DerivedFulfillment::Fulfilled));
    }

    #[test]
    fn test_derive_all_unfulfilled() {
        let derived = derive_fulfillment_status(["unfulfilled", "unfulfilled"]);
        assert_eq!(derived, Some(DerivedFulfillment::Unfulfilled));
    }

    #[test]
    fn test_derive_mixed_is_partial() {
        let derived = derive_fulfillment_status(["fulfilled", "unfulfilled"]);
        assert_eq!(derived, Some(DerivedFulfillment::Partial));

        // Unknown statuses also break both "all" cases.
        let derived = derive_fulfillment_status(["fulfilled", "restocked"]);
        assert_eq!(derived, Some(DerivedFulfillment::Partial));
    }

    #[test]
    fn test_derive_empty_listing() {
        assert_eq!(derive_fulfillment_status(std::iter::empty::<&str>()), None);
    }
}
