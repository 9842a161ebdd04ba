//! Authentication service.
//!
//! A stubbed credential check over an in-memory account table. There is no
//! session persistence and no password hashing - accounts live only as long
//! as the service, and the credential check is a comparison behind a
//! simulated delay. The shape of the API (typed errors, generic
//! "invalid credentials") is what a real backend would slot into.

mod error;

pub use error::AuthError;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use night_owl_core::Email;

use crate::config::StorefrontConfig;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// An authenticated shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The account email.
    pub email: Email,
    /// Display name derived at registration.
    pub name: String,
}

struct Account {
    email: Email,
    name: String,
    password: SecretString,
}

struct AuthState {
    accounts: Vec<Account>,
    current_user: Option<User>,
}

/// Authentication service.
///
/// Cheaply-cloneable handle; clones share the account table and the signed-in
/// user. Seeded with one demo account:
/// `demo@nightowl.example` / `snacktime`.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    state: Mutex<AuthState>,
    delay: Duration,
}

impl AuthService {
    /// Create the service with the demo account seeded.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let demo = Account {
            email: Email::parse("demo@nightowl.example")
                .unwrap_or_else(|_| unreachable!("demo email is valid")),
            name: "Demo Shopper".to_owned(),
            password: SecretString::from("snacktime"),
        };

        Self {
            inner: Arc::new(AuthInner {
                state: Mutex::new(AuthState {
                    accounts: vec![demo],
                    current_user: None,
                }),
                delay: config.auth_delay,
            }),
        }
    }

    /// Log in with email and password.
    ///
    /// Simulates a credential check delay, then signs the user in on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse,
    /// `AuthError::InvalidCredentials` if the email/password is wrong, and
    /// `AuthError::Cancelled` if `cancel` fires before the check completes.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        tokio::select! {
            () = cancel.cancelled() => return Err(AuthError::Cancelled),
            () = tokio::time::sleep(self.inner.delay) => {}
        }

        let mut state = self.lock();
        let user = state
            .accounts
            .iter()
            .find(|account| {
                account.email == email && account.password.expose_secret() == password
            })
            .map(|account| User {
                email: account.email.clone(),
                name: account.name.clone(),
            })
            .ok_or_else(|| {
                warn!(email = %email, "Login failed");
                AuthError::InvalidCredentials
            })?;

        debug!(email = %user.email, "Login succeeded");
        state.current_user = Some(user.clone());
        Ok(user)
    }

    /// Register a new account.
    ///
    /// The account exists only in memory; there is no verification email and
    /// nothing survives a restart. Does not sign the user in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse,
    /// `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::AlreadyRegistered` for a duplicate email.
    #[instrument(skip_all)]
    pub fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let mut state = self.lock();
        if state.accounts.iter().any(|account| account.email == email) {
            return Err(AuthError::AlreadyRegistered);
        }

        let name = email.local_part().to_owned();
        state.accounts.push(Account {
            email: email.clone(),
            name: name.clone(),
            password: SecretString::from(password.to_owned()),
        });

        debug!(email = %email, "Account registered");
        Ok(User { email, name })
    }

    /// Sign the current user out. A no-op if nobody is signed in.
    pub fn logout(&self) {
        self.lock().current_user = None;
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock().current_user.clone()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().current_user.is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AuthState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(&StorefrontConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_login_succeeds() {
        let auth = service();
        let user = auth
            .login("demo@nightowl.example", "snacktime", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(user.name, "Demo Shopper");
        assert!(auth.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_is_generic_failure() {
        let auth = service();
        let err = auth
            .login("demo@nightowl.example", "wrong", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_account_is_generic_failure() {
        let auth = service();
        let err = auth
            .login("nobody@example.com", "whatever1", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_login() {
        let auth = service();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = auth
            .login("demo@nightowl.example", "snacktime", &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_login() {
        let auth = service();
        auth.register("new@example.com", "longenough").unwrap();

        let user = auth
            .login("new@example.com", "longenough", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(user.name, "new");
    }

    #[test]
    fn test_register_weak_password() {
        let auth = service();
        let err = auth.register("new@example.com", "short").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[test]
    fn test_register_duplicate() {
        let auth = service();
        auth.register("new@example.com", "longenough").unwrap();
        let err = auth.register("new@example.com", "longenough").unwrap_err();
        assert!(matches!(err, AuthError::AlreadyRegistered));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_session() {
        let auth = service();
        auth.login("demo@nightowl.example", "snacktime", &CancellationToken::new())
            .await
            .unwrap();

        auth.logout();
        assert!(auth.current_user().is_none());
    }
}
