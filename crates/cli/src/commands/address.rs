//! `orderly address` - shipping/billing address updates.

use orderly_client::{AddressInput, OptimisticAddress, UpdatePhase};

use super::CommandError;

/// Update the order's address, optimistically for shipping.
pub async fn update(
    order_gid: &str,
    billing: bool,
    address: AddressInput,
) -> Result<(), CommandError> {
    let client = super::client_from_env()?;

    if billing {
        client.update_billing_address(order_gid, &address).await?;
        tracing::info!("Billing address updated");
        return Ok(());
    }

    let mut state = OptimisticAddress::default();
    let result = client
        .update_shipping_address_optimistic(&mut state, order_gid, address)
        .await;

    match state.phase() {
        UpdatePhase::Applied => tracing::info!("Shipping address updated"),
        UpdatePhase::RolledBack => tracing::warn!("Shipping address update rolled back"),
        UpdatePhase::Idle | UpdatePhase::Pending => {}
    }

    result.map_err(CommandError::from)
}
