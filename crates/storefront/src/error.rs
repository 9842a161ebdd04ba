//! Unified error handling for the storefront.
//!
//! Provides a unified `AppError` type so a frontend surface can hold one
//! error over any combination of services.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// A user-presentable message that never leaks internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found".to_owned(),
            Self::Catalog(CatalogError::Cancelled)
            | Self::Auth(AuthError::Cancelled)
            | Self::Checkout(CheckoutError::Cancelled) => "Cancelled".to_owned(),
            Self::Auth(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
                "Invalid credentials".to_owned()
            }
            Self::Auth(AuthError::AlreadyRegistered) => {
                "An account with this email already exists".to_owned()
            }
            Self::Auth(AuthError::WeakPassword(msg)) => msg.clone(),
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_owned(),
            Self::Checkout(CheckoutError::MissingField(field)) => {
                format!("Please fill in the {} field", field.replace('_', " "))
            }
            Self::Checkout(CheckoutError::InvalidEmail(_)) => {
                "Please enter a valid email address".to_owned()
            }
            Self::Config(_) => "Configuration error".to_owned(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
