//! `orderly status` - eligibility report for an order.

use chrono::Utc;
use orderly_core::{EditWindow, WindowState, format_remaining, gid, validate};

use super::CommandError;

/// Onboarding step reported when the edit surface is first opened.
const ONBOARDING_STEP_FIRST_VISIT: u32 = 1;

/// Fetch settings and order state, then report eligibility.
pub async fn show(order_gid: &str) -> Result<(), CommandError> {
    let client = super::client_from_env()?;

    // Same telemetry the order page sends on first load; never blocks the
    // command.
    if let Err(e) = client
        .complete_onboarding_step(ONBOARDING_STEP_FIRST_VISIT)
        .await
    {
        tracing::warn!("Onboarding telemetry failed: {e}");
    }

    let settings = client.fetch_settings().await?;
    let order = client.fetch_order(order_gid).await?;
    let snapshot = order.snapshot();

    let eligibility = validate(&settings, &snapshot, Utc::now());

    tracing::info!("Order #{}", gid::extract_numeric_id(order_gid));
    if eligibility.can_edit {
        tracing::info!("Order can be edited");
    } else {
        tracing::info!("Order cannot be edited:");
        for error in &eligibility.errors {
            tracing::info!("  - {error}");
        }
    }
    tracing::info!("  Items editable: {}", eligibility.can_edit_items);
    tracing::info!("  Shipping editable: {}", eligibility.can_edit_shipping);

    if settings.edit_time_window > 0
        && let Some(created_at) = snapshot.created_at
    {
        let window = EditWindow::new(created_at, settings.edit_time_window);
        match window.state(Utc::now()) {
            WindowState::Open { remaining_secs } => {
                tracing::info!("  Edit window: {} remaining", format_remaining(remaining_secs));
            }
            WindowState::Closing { remaining_secs } => {
                tracing::info!(
                    "  Edit window closing soon: {} remaining",
                    format_remaining(remaining_secs)
                );
            }
            WindowState::Expired => {
                tracing::info!("  Edit window: expired");
            }
        }
    }

    Ok(())
}
