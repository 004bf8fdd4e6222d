//! CLI command implementations.

pub mod address;
pub mod edit;
pub mod status;

use orderly_client::{ClientConfig, ClientError, ConfigError, OrderlyClient};
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A command argument could not be parsed.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The order failed eligibility validation.
    #[error("order is not editable")]
    NotEditable,
}

/// Build a backend client from the environment.
pub(crate) fn client_from_env() -> Result<OrderlyClient, CommandError> {
    let config = ClientConfig::from_env()?;
    Ok(OrderlyClient::new(&config))
}
