//! Orderly Core - order-edit domain logic.
//!
//! This crate holds the framework-free heart of Orderly's post-purchase
//! order editing:
//!
//! - [`validate`] - decides whether a placed order may still be edited
//! - [`totals`] - recomputes subtotal/tax/total for a pending edit
//! - [`payload`] - builds the diff payload submitted to the backend
//! - [`window`] - edit-time-window countdown arithmetic
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no clocks read behind the caller's back. Every operation takes the data it
//! needs as arguments (including `now`), which keeps it portable and
//! unit-testable in isolation. The `client` crate layers networking on top.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod edit;
pub mod gid;
pub mod payload;
pub mod totals;
pub mod types;
pub mod validate;
pub mod window;

pub use edit::{EditLine, QuantityOverrides, Selections, edit_lines, parse_quantity};
pub use payload::{AddLineItem, OrderEditPayload, UpdateLineItem, build_payload};
pub use totals::{UpdatedTotals, all_quantities_zero, compute_totals, has_changes};
pub use types::*;
pub use validate::{Eligibility, validate};
pub use window::{CLOSING_THRESHOLD_SECS, EditWindow, WindowState, format_remaining};
