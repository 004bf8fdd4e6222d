//! Pending-edit state: quantity overrides, picked variants and the unified
//! view over both.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::types::{LineItem, Money, SelectedVariant};

/// Sanitize a raw quantity string from an input field.
///
/// Strips everything that is not a digit or a leading minus, then clamps the
/// parsed value to zero. Unparseable input becomes `0` rather than an error,
/// so a stray keystroke never rejects the whole field.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    cleaned.parse::<i64>().map_or(0, |n| {
        u32::try_from(n.max(0)).unwrap_or(u32::MAX)
    })
}

/// Pending quantity changes for existing line items, keyed by line-item id.
///
/// An absent key means "unchanged"; a value of `0` means the line is being
/// removed. Values are unsigned, so a negative quantity cannot be
/// represented at all.
#[derive(Debug, Clone, Default)]
pub struct QuantityOverrides(HashMap<String, u32>);

impl QuantityOverrides {
    /// An empty override set (a no-op edit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pending quantity for a line item.
    pub fn set(&mut self, line_item_id: impl Into<String>, quantity: u32) {
        self.0.insert(line_item_id.into(), quantity);
    }

    /// Set the pending quantity from raw text input, sanitizing first.
    pub fn set_raw(&mut self, line_item_id: impl Into<String>, raw: &str) {
        self.set(line_item_id, parse_quantity(raw));
    }

    /// Mark a line item for removal.
    pub fn remove_line(&mut self, line_item_id: impl Into<String>) {
        self.set(line_item_id, 0);
    }

    /// The pending quantity for a line item, if one was set.
    #[must_use]
    pub fn get(&self, line_item_id: &str) -> Option<u32> {
        self.0.get(line_item_id).copied()
    }

    /// The quantity to use for a line item: its override when present,
    /// otherwise the original quantity.
    #[must_use]
    pub fn effective_quantity(&self, item: &LineItem) -> u32 {
        self.get(&item.id).unwrap_or(item.quantity)
    }

    /// Whether no overrides have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop all pending changes.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Variants the customer picked to add to the order.
///
/// Quantities are mutated in place by variant id. Entries can be removed
/// outright or soft-removed by zeroing the quantity, which keeps the row
/// visible in a picker while excluding it from the submitted payload.
#[derive(Debug, Clone, Default)]
pub struct Selections(Vec<SelectedVariant>);

impl Selections {
    /// An empty selection list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a picked variant.
    pub fn push(&mut self, selection: SelectedVariant) {
        self.0.push(selection);
    }

    /// Change the quantity of a picked variant in place.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: u32) {
        for entry in &mut self.0 {
            if entry.variant.variant_id == variant_id {
                entry.quantity = quantity;
            }
        }
    }

    /// Change the quantity from raw text input, sanitizing first.
    pub fn set_quantity_raw(&mut self, variant_id: &str, raw: &str) {
        self.set_quantity(variant_id, parse_quantity(raw));
    }

    /// Remove a picked variant entirely.
    pub fn remove(&mut self, variant_id: &str) {
        self.0.retain(|entry| entry.variant.variant_id != variant_id);
    }

    /// Soft-remove: keep the entry but zero its quantity.
    pub fn zero(&mut self, variant_id: &str) {
        self.set_quantity(variant_id, 0);
    }

    /// Drop all selections.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The selections as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectedVariant] {
        &self.0
    }

    /// Whether nothing has been selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selections (including zero-quantity ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a Selections {
    type Item = &'a SelectedVariant;
    type IntoIter = std::slice::Iter<'a, SelectedVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One line of a pending edit: either an existing order line (with its
/// effective quantity) or a newly picked variant.
///
/// The calculator and the payload builder both consume this view, so the two
/// shapes never need to be told apart by probing their fields.
#[derive(Debug, Clone)]
pub enum EditLine<'a> {
    /// A line already on the order.
    Existing {
        /// The original line item.
        item: &'a LineItem,
        /// Quantity after applying any override.
        quantity: u32,
    },
    /// A newly picked variant, not yet on the order.
    New {
        /// The picked variant and its quantity.
        selection: &'a SelectedVariant,
    },
}

impl EditLine<'_> {
    /// Unit price of the line.
    #[must_use]
    pub const fn unit_price(&self) -> &Money {
        match self {
            Self::Existing { item, .. } => &item.price,
            Self::New { selection } => &selection.variant.price,
        }
    }

    /// Quantity the line contributes to the edited order.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        match self {
            Self::Existing { quantity, .. } => *quantity,
            Self::New { selection } => selection.quantity,
        }
    }

    /// Variant GID, when resolvable.
    #[must_use]
    pub fn variant_id(&self) -> Option<&str> {
        match self {
            Self::Existing { item, .. } => item.variant_id.as_deref(),
            Self::New { selection } => Some(&selection.variant.variant_id),
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price().amount * Decimal::from(self.quantity())
    }
}

/// Build the unified edit-line view over existing items and new selections.
#[must_use]
pub fn edit_lines<'a>(
    line_items: &'a [LineItem],
    overrides: &QuantityOverrides,
    selected: &'a [SelectedVariant],
) -> Vec<EditLine<'a>> {
    line_items
        .iter()
        .map(|item| EditLine::Existing {
            item,
            quantity: overrides.effective_quantity(item),
        })
        .chain(selected.iter().map(|selection| EditLine::New { selection }))
        .collect()
}
