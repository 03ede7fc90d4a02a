//! `storefront-core`: shared building blocks for the storefront client.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no DOM): typed
//! identifiers, the client-side validation error model and money rendering.

pub mod error;
pub mod id;
pub mod money;

pub use error::{ValidationError, ValidationResult};
pub use id::ProductId;
pub use money::{Money, format_amount, format_price};
