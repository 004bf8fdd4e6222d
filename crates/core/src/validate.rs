//! Order-edit eligibility rules.
//!
//! Given the merchant settings and a snapshot of the order's state, produce
//! the list of human-readable reasons the order cannot be edited plus the
//! capability flags that gate every mutation affordance downstream. The
//! backend enforces the same rules independently; these exist so the UI can
//! explain itself without a round trip.

use chrono::{DateTime, Utc};

use crate::types::{EditType, OrderSnapshot, Settings};

/// Result of validating an order against the merchant settings.
#[derive(Debug, Clone)]
pub struct Eligibility {
    /// Human-readable reasons the order cannot be edited, in rule order.
    /// Empty when the order is editable.
    pub errors: Vec<String>,
    /// Whether any edit is allowed at all.
    pub can_edit: bool,
    /// Whether line-item edits are offered.
    pub can_edit_items: bool,
    /// Whether shipping-address edits are offered.
    pub can_edit_shipping: bool,
}

/// Validate an order against the merchant settings.
///
/// Rules are applied in a fixed order and never short-circuit, so several
/// errors can accumulate. A status check is skipped when either the settings
/// list or the order's status is absent.
#[must_use]
pub fn validate(settings: &Settings, order: &OrderSnapshot, now: DateTime<Utc>) -> Eligibility {
    let mut errors = Vec::new();

    if !settings.enable_order_editing {
        errors.push("Order editing is currently disabled.".to_string());
    }

    if settings.edit_time_window > 0
        && let Some(created_at) = order.created_at
        && (now - created_at).num_seconds() > i64::from(settings.edit_time_window) * 60
    {
        errors.push(format!(
            "Orders can only be edited within {} of placement.",
            window_text(settings.edit_time_window)
        ));
    }

    if !settings.safe_financial_statuses.is_empty()
        && let Some(status) = order.financial_status.as_deref()
        && !contains_ignore_case(&settings.safe_financial_statuses, status)
    {
        errors.push(format!(
            "Orders with \"{}\" financial status cannot be edited.",
            humanize_status(status)
        ));
    }

    if !settings.safe_fulfillment_statuses.is_empty()
        && let Some(status) = order.fulfillment_status.as_deref()
        && !contains_ignore_case(&settings.safe_fulfillment_statuses, status)
    {
        errors.push(format!(
            "Orders with \"{}\" fulfillment status cannot be edited.",
            humanize_status(status)
        ));
    }

    Eligibility {
        can_edit: errors.is_empty(),
        can_edit_items: settings.allows(EditType::Items),
        can_edit_shipping: settings.allows(EditType::Shipping),
        errors,
    }
}

/// Format an edit window in minutes as user-facing text.
///
/// `90` becomes "1 hour 30 minutes", `120` becomes "2 hours", `45` becomes
/// "45 minutes".
#[must_use]
pub fn window_text(window_minutes: u32) -> String {
    let hours = window_minutes / 60;
    let minutes = window_minutes % 60;

    if hours == 0 {
        return format!("{minutes} minutes");
    }

    let mut text = format!("{hours} hour{}", if hours > 1 { "s" } else { "" });
    if minutes > 0 {
        text.push_str(&format!(" {minutes} minutes"));
    }
    text
}

/// Lowercase a status and replace underscores, so `PARTIALLY_FULFILLED`
/// reads as "partially fulfilled".
fn humanize_status(status: &str) -> String {
    status.to_lowercase().replace('_', " ")
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|s| s.eq_ignore_ascii_case(needle))
}
