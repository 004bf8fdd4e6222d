//! Orderly Client - async HTTP client for the merchant backend.
//!
//! Wraps the backend's JSON API (settings, order lookup, order-edit
//! submission, address updates, onboarding telemetry) behind a typed
//! interface. All requests carry a bearer session token issued by the host
//! runtime; every call is a single attempt with no retry policy, and a
//! failed call leaves caller-side state untouched.
//!
//! The [`countdown`] module drives the edit-window countdown from a
//! 1-second timer; [`address`] models the optimistic shipping-address
//! update with explicit rollback.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
mod client;
pub mod config;
pub mod countdown;
pub mod error;
pub mod types;

pub use address::{OptimisticAddress, UpdatePhase};
pub use client::OrderlyClient;
pub use config::{ClientConfig, ConfigError};
pub use countdown::Countdown;
pub use error::ClientError;
pub use types::{AddressInput, RemoteLineItem, RemoteOrder};
