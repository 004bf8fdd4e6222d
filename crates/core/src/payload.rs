//! Building the order-edit payload submitted to the backend.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::edit::{EditLine, QuantityOverrides, edit_lines};
use crate::types::{LineItem, SelectedVariant};

/// A changed existing line. `quantity` is the new cumulative quantity, not a
/// delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLineItem {
    /// Line-item id on the order.
    pub id: String,
    /// Variant GID backing the line.
    pub variant_gid: String,
    /// New cumulative quantity (0 removes the line).
    pub quantity: u32,
}

/// A newly added line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLineItem {
    /// Variant GID to add.
    pub variant_gid: String,
    /// Quantity to add.
    pub quantity: u32,
}

/// The diff payload for `POST /orders`.
///
/// Either array is omitted from the JSON entirely when empty; the backend
/// distinguishes "no change requested" from "change to an empty list".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEditPayload {
    /// GID of the order being edited.
    pub order_gid: String,
    /// Changed existing lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_line_items: Option<Vec<UpdateLineItem>>,
    /// Newly added lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_line_items: Option<Vec<AddLineItem>>,
}

impl OrderEditPayload {
    /// Whether the payload carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.update_line_items.is_none() && self.add_line_items.is_none()
    }
}

/// Build the diff payload for a pending edit.
///
/// Existing lines are included only when their effective quantity differs
/// from the original; picked variants only when their quantity is above
/// zero. A changed line whose variant GID cannot be resolved is skipped with
/// a warning rather than failing the whole submission.
#[must_use]
pub fn build_payload(
    order_gid: &str,
    line_items: &[LineItem],
    overrides: &QuantityOverrides,
    selected: &[SelectedVariant],
) -> OrderEditPayload {
    let mut updates = Vec::new();
    let mut additions = Vec::new();

    for line in edit_lines(line_items, overrides, selected) {
        match line {
            EditLine::Existing { item, quantity } => {
                if quantity == item.quantity {
                    continue;
                }
                let Some(variant_gid) = item.variant_id.as_deref() else {
                    warn!(
                        line_item_id = %item.id,
                        "skipping quantity update: line item has no variant GID"
                    );
                    continue;
                };
                updates.push(UpdateLineItem {
                    id: item.id.clone(),
                    variant_gid: variant_gid.to_string(),
                    quantity,
                });
            }
            EditLine::New { selection } => {
                if selection.quantity == 0 {
                    continue;
                }
                additions.push(AddLineItem {
                    variant_gid: selection.variant.variant_id.clone(),
                    quantity: selection.quantity,
                });
            }
        }
    }

    OrderEditPayload {
        order_gid: order_gid.to_string(),
        update_line_items: (!updates.is_empty()).then_some(updates),
        add_line_items: (!additions.is_empty()).then_some(additions),
    }
}
