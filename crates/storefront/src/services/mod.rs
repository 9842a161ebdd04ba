//! Storefront services.

pub mod account;
pub mod auth;
