//! Night Owl Core - Shared types library.
//!
//! This crate provides common types used across all Night Owl Snacks
//! components:
//! - `storefront` - The storefront library (catalog, cart, checkout, account)
//! - `integration-tests` - Cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no async runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities,
//!   emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
