//! Night Owl Snacks Storefront library.
//!
//! This crate provides the storefront functionality as a library: product
//! catalog with simulated fetch latency, the cart store, the checkout flow,
//! and the mocked account/auth services. Frontend surfaces (listing, detail,
//! cart, checkout views) consume everything through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
