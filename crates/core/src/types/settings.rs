//! Merchant settings governing post-purchase order edits.

use serde::{Deserialize, Serialize};

/// The kinds of edits a merchant can allow customers to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    /// Line-item quantity changes, removals and additions.
    Items,
    /// Shipping address changes.
    Shipping,
}

impl EditType {
    /// The wire name used in `allowed_edit_types`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Shipping => "shipping",
        }
    }
}

/// Merchant settings fetched from the backend.
///
/// Fetched once per session and treated as immutable afterwards. Unknown or
/// omitted fields fall back to their defaults so older backends keep working.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch for the whole feature.
    #[serde(default)]
    pub enable_order_editing: bool,
    /// Minutes after placement during which edits are allowed. `0` disables
    /// the time-window check.
    #[serde(default)]
    pub edit_time_window: u32,
    /// Financial statuses that keep an order editable. Empty disables the
    /// check.
    #[serde(default)]
    pub safe_financial_statuses: Vec<String>,
    /// Fulfillment statuses that keep an order editable. Empty disables the
    /// check.
    #[serde(default)]
    pub safe_fulfillment_statuses: Vec<String>,
    /// Which edit surfaces are offered (`"items"`, `"shipping"`).
    #[serde(default)]
    pub allowed_edit_types: Vec<String>,
    /// Customer groups allowed to edit. Enforced by the backend; carried here
    /// for completeness.
    #[serde(default)]
    pub who_can_edit: Vec<String>,
    /// Whether the backend notifies the customer after a committed edit.
    #[serde(default)]
    pub notify_on_edit: bool,
}

impl Settings {
    /// Whether the merchant allows the given kind of edit.
    #[must_use]
    pub fn allows(&self, edit_type: EditType) -> bool {
        self.allowed_edit_types
            .iter()
            .any(|t| t == edit_type.as_str())
    }
}
