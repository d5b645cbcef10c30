//! Storefront Checkout Core - Shared types library.
//!
//! This crate provides common types used across the checkout components:
//! - `storefront-checkout` - Cart store, catalog client, checkout form and payment submitter
//! - `storefront-checkout-cli` - Command-line driver for the checkout flow
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and payment statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
