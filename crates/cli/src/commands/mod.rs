//! Subcommand implementations.
//!
//! Results go to stdout; logs go to stderr through `tracing`.

pub mod cart;
pub mod catalog;
pub mod checkout;
