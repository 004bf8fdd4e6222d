//! Recomputing order totals for a pending edit.
//!
//! The backend recalculates authoritative totals when an edit is committed;
//! these figures exist so the customer sees the financial effect of their
//! changes before submitting. Tax is approximated by applying the order's
//! original effective tax rate to the new subtotal.

use rust_decimal::Decimal;

use crate::edit::{EditLine, QuantityOverrides, edit_lines};
use crate::types::{LineItem, Money, SelectedVariant};

/// Recomputed totals for a pending edit. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedTotals {
    /// Sum of all effective line totals.
    pub subtotal: Money,
    /// Tax at the order's original effective rate.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

/// Compute the edited order's subtotal, tax and total.
///
/// Existing items contribute price times effective quantity (override when
/// present, original otherwise); picked variants contribute price times
/// quantity. The original tax rate is `original_tax / original_subtotal`,
/// or zero when the original subtotal is zero. All amounts are rounded to
/// two decimal places; the currency is inherited from the original subtotal.
///
/// With no overrides and no selections this reproduces the original
/// subtotal/tax/total exactly.
#[must_use]
pub fn compute_totals(
    line_items: &[LineItem],
    overrides: &QuantityOverrides,
    selected: &[SelectedVariant],
    original_subtotal: &Money,
    original_tax: &Money,
) -> UpdatedTotals {
    let currency = &original_subtotal.currency_code;

    let new_subtotal: Decimal = edit_lines(line_items, overrides, selected)
        .iter()
        .map(EditLine::line_total)
        .sum();

    let tax_rate = if original_subtotal.amount > Decimal::ZERO {
        original_tax.amount / original_subtotal.amount
    } else {
        Decimal::ZERO
    };
    let new_tax = new_subtotal * tax_rate;
    let new_total = new_subtotal + new_tax;

    UpdatedTotals {
        subtotal: Money::new(new_subtotal, currency.clone()).rounded(),
        tax: Money::new(new_tax, currency.clone()).rounded(),
        total: Money::new(new_total, currency.clone()).rounded(),
    }
}

/// Whether the pending edit changes anything: an effective quantity differs
/// from its original, or at least one variant has been picked.
#[must_use]
pub fn has_changes(
    line_items: &[LineItem],
    overrides: &QuantityOverrides,
    selected: &[SelectedVariant],
) -> bool {
    !selected.is_empty()
        || line_items
            .iter()
            .any(|item| overrides.effective_quantity(item) != item.quantity)
}

/// Whether the pending edit cancels the whole order: every existing line's
/// effective quantity is zero and nothing new has been picked. The primary
/// action is labelled "Cancel" instead of "Update" in that case.
#[must_use]
pub fn all_quantities_zero(
    line_items: &[LineItem],
    overrides: &QuantityOverrides,
    selected: &[SelectedVariant],
) -> bool {
    selected.is_empty()
        && line_items
            .iter()
            .all(|item| overrides.effective_quantity(item) == 0)
}
