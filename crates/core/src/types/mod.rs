//! Core types for Orderly.
//!
//! Wire-facing data shapes shared by the validator, the calculator and the
//! backend client.

pub mod money;
pub mod order;
pub mod settings;

pub use money::{DEFAULT_CURRENCY, Money};
pub use order::{
    DerivedFulfillment, Image, LineItem, OrderSnapshot, SelectedVariant, VariantWithProduct,
    derive_fulfillment_status,
};
pub use settings::{EditType, Settings};
