//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] night_owl_core::EmailError),

    /// Invalid credentials (wrong password or unknown account).
    ///
    /// Deliberately generic: the login surface shows one message for both
    /// cases and never reveals whether the account exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("account already registered")]
    AlreadyRegistered,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The caller cancelled before the credential check completed.
    #[error("authentication cancelled")]
    Cancelled,
}
