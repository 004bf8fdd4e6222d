//! `orderly preview` and `orderly submit` - pending-edit commands.

use chrono::Utc;
use orderly_core::{
    Money, QuantityOverrides, SelectedVariant, Selections, VariantWithProduct, all_quantities_zero,
    build_payload, compute_totals, has_changes, parse_quantity, validate,
};
use rust_decimal::Decimal;

use super::CommandError;

/// Recompute and print totals for the requested edit without submitting.
pub async fn preview(order_gid: &str, set: &[String], add: &[String]) -> Result<(), CommandError> {
    let client = super::client_from_env()?;
    let settings = client.fetch_settings().await?;
    let order = client.fetch_order(order_gid).await?;

    let eligibility = validate(&settings, &order.snapshot(), Utc::now());
    for error in &eligibility.errors {
        tracing::warn!("{error}");
    }

    let line_items = order.to_line_items();
    let overrides = parse_overrides(set, &line_items)?;
    let selections = parse_additions(add, order.original_subtotal().currency_code.as_str())?;

    let totals = compute_totals(
        &line_items,
        &overrides,
        selections.as_slice(),
        &order.original_subtotal(),
        &order.original_tax(),
    );

    tracing::info!("Subtotal: {}", totals.subtotal);
    tracing::info!("Tax:      {}", totals.tax);
    tracing::info!("Total:    {}", totals.total);

    if all_quantities_zero(&line_items, &overrides, selections.as_slice()) {
        tracing::info!("This edit cancels the whole order (action: Cancel)");
    } else if has_changes(&line_items, &overrides, selections.as_slice()) {
        tracing::info!("Pending changes (action: Update)");
    } else {
        tracing::info!("No changes");
    }

    Ok(())
}

/// Build the diff payload for the requested edit and submit it.
pub async fn submit(order_gid: &str, set: &[String], add: &[String]) -> Result<(), CommandError> {
    let client = super::client_from_env()?;
    let settings = client.fetch_settings().await?;
    let order = client.fetch_order(order_gid).await?;

    let eligibility = validate(&settings, &order.snapshot(), Utc::now());
    if !eligibility.can_edit {
        for error in &eligibility.errors {
            tracing::error!("{error}");
        }
        return Err(CommandError::NotEditable);
    }

    let line_items = order.to_line_items();
    let overrides = parse_overrides(set, &line_items)?;
    let selections = parse_additions(add, order.original_subtotal().currency_code.as_str())?;

    let payload = build_payload(order_gid, &line_items, &overrides, selections.as_slice());
    if payload.is_empty() {
        tracing::info!("No changes to submit");
        return Ok(());
    }

    client.submit_edit(&payload).await?;
    tracing::info!("Order edit submitted");
    Ok(())
}

/// Parse repeated `LINE_ITEM_ID=QTY` arguments into quantity overrides.
///
/// Quantities go through the same sanitizer as the UI quantity fields.
/// Unknown line-item ids are warned about and recorded anyway; the payload
/// builder drops anything that does not match the order.
fn parse_overrides(
    set: &[String],
    line_items: &[orderly_core::LineItem],
) -> Result<QuantityOverrides, CommandError> {
    let mut overrides = QuantityOverrides::new();
    for pair in set {
        let (id, qty) = pair.split_once('=').ok_or_else(|| {
            CommandError::InvalidArg(format!("expected LINE_ITEM_ID=QTY, got \"{pair}\""))
        })?;
        if !line_items.iter().any(|item| item.id == id) {
            tracing::warn!("line item \"{id}\" is not on this order");
        }
        overrides.set(id, parse_quantity(qty));
    }
    Ok(overrides)
}

/// Parse repeated `VARIANT_GID=QTY[@UNIT_PRICE]` arguments into selections.
///
/// The unit price only affects the local totals preview; the submitted
/// payload carries variant and quantity alone.
fn parse_additions(add: &[String], currency: &str) -> Result<Selections, CommandError> {
    let mut selections = Selections::new();
    for pair in add {
        let (gid, rest) = pair.split_once('=').ok_or_else(|| {
            CommandError::InvalidArg(format!("expected VARIANT_GID=QTY, got \"{pair}\""))
        })?;
        let (qty, price) = match rest.split_once('@') {
            Some((qty, price)) => {
                let amount: Decimal = price.parse().map_err(|_| {
                    CommandError::InvalidArg(format!("invalid unit price \"{price}\""))
                })?;
                (qty, amount)
            }
            None => (rest, Decimal::ZERO),
        };

        selections.push(SelectedVariant {
            variant: VariantWithProduct {
                variant_id: gid.to_string(),
                variant_title: String::new(),
                product_id: String::new(),
                product_title: String::new(),
                price: Money::new(price, currency.to_string()),
                available_for_sale: true,
                sku: None,
                image: None,
            },
            quantity: parse_quantity(qty),
        });
    }
    Ok(selections)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides_pairs() {
        let items = vec![orderly_core::LineItem {
            id: "L1".to_string(),
            title: "Item".to_string(),
            quantity: 2,
            price: Money::new("5.00".parse().unwrap(), "USD".to_string()),
            variant_id: None,
        }];
        let overrides = parse_overrides(&["L1=3".to_string()], &items).unwrap();
        assert_eq!(overrides.get("L1"), Some(3));
    }

    #[test]
    fn test_parse_overrides_rejects_missing_equals() {
        let result = parse_overrides(&["L1".to_string()], &[]);
        assert!(matches!(result, Err(CommandError::InvalidArg(_))));
    }

    #[test]
    fn test_parse_additions_with_price() {
        let selections = parse_additions(
            &["gid://shopify/ProductVariant/9=2@20.00".to_string()],
            "USD",
        )
        .unwrap();
        let selection = &selections.as_slice()[0];
        assert_eq!(selection.quantity, 2);
        assert_eq!(selection.variant.price.to_fixed(), "20.00");
    }

    #[test]
    fn test_parse_additions_defaults_price_to_zero() {
        let selections =
            parse_additions(&["gid://shopify/ProductVariant/9=1".to_string()], "USD").unwrap();
        assert_eq!(selections.as_slice()[0].variant.price.to_fixed(), "0.00");
    }
}
