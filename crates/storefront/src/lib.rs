//! Storefront checkout library.
//!
//! Client-side core of a web shop: a persisted cart of stock ids, a catalog
//! client for the shop's REST API, the checkout form with its validation and
//! formatting, and the payment submitter.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod payment;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
