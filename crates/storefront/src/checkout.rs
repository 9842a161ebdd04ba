//! Checkout flow over the cart store.
//!
//! Reads the cart totals, prices shipping and tax into an [`OrderQuote`],
//! and simulates payment processing with a fixed delay. Payment always
//! succeeds once the delay elapses; the only refusals are an empty cart, an
//! invalid form, or cancellation before processing completes. On success the
//! cart is cleared wholesale.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use night_owl_core::{Email, EmailError, OrderId, Price};

use crate::cart::{CartStore, CartSummary};
use crate::config::StorefrontConfig;

// =============================================================================
// Form types
// =============================================================================

/// Contact step of the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
}

/// Shipping step of the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Payment step of the checkout form.
///
/// Card details are never charged or stored; they only have to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
}

/// The full checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub contact: ContactInfo,
    pub shipping: ShippingAddress,
    pub payment: PaymentDetails,
    /// "Save my information" checkbox; accepted and ignored (no persistence).
    #[serde(default)]
    pub save_info: bool,
}

// =============================================================================
// Quote and confirmation
// =============================================================================

/// Priced breakdown of an order before submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Generated order number (e.g., "ORD4821"). In-memory only.
    pub order_number: OrderId,
    /// Where the (pretend) confirmation email went.
    pub email: Email,
    /// The priced breakdown that was charged.
    pub quote: OrderQuote,
    /// When the order completed.
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from checkout submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items; there is nothing to charge.
    #[error("cart is empty")]
    EmptyCart,

    /// A required form field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The contact email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The caller cancelled before processing completed.
    #[error("checkout cancelled")]
    Cancelled,
}

// =============================================================================
// CheckoutService
// =============================================================================

/// The checkout workflow.
///
/// Holds a cart handle and the pricing/delay configuration. Cheap to clone.
#[derive(Clone)]
pub struct CheckoutService {
    cart: CartStore,
    config: StorefrontConfig,
}

impl CheckoutService {
    /// Create a checkout service over the given cart.
    #[must_use]
    pub const fn new(cart: CartStore, config: StorefrontConfig) -> Self {
        Self { cart, config }
    }

    /// Price a cart summary into a full order quote.
    ///
    /// Shipping is free at or above the configured threshold, otherwise a
    /// flat price. Tax applies to the subtotal only and is rounded to cents.
    #[must_use]
    pub fn quote(&self, summary: &CartSummary) -> OrderQuote {
        let currency = summary.subtotal.currency_code;

        let shipping = if summary.subtotal.amount >= self.config.free_shipping_threshold {
            Price::zero(currency)
        } else {
            Price::new(self.config.shipping_price, currency)
        };

        let tax = Price::new(
            (summary.subtotal.amount * self.config.tax_rate).round_dp(2),
            currency,
        );

        OrderQuote {
            subtotal: summary.subtotal,
            shipping,
            tax,
            total: summary.subtotal.plus(shipping).plus(tax),
        }
    }

    /// Quote the cart as it stands right now.
    #[must_use]
    pub fn quote_current(&self) -> OrderQuote {
        self.quote(&self.cart.summary())
    }

    /// Submit the checkout.
    ///
    /// Validates the form, simulates payment processing, then clears the
    /// cart and returns the confirmation. Cancellation before the processing
    /// delay elapses leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy,
    /// [`CheckoutError::MissingField`]/[`CheckoutError::InvalidEmail`] for
    /// form problems, and [`CheckoutError::Cancelled`] if `cancel` fires
    /// before processing completes.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        form: &CheckoutForm,
        cancel: &CancellationToken,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let summary = self.cart.summary();
        if summary.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let email = validate(form)?;
        let quote = self.quote(&summary);

        // Simulated payment processing; always succeeds once the delay
        // elapses. No cart state is touched until it does.
        tokio::select! {
            () = cancel.cancelled() => return Err(CheckoutError::Cancelled),
            () = tokio::time::sleep(self.config.checkout_processing_delay) => {}
        }

        self.cart.clear();

        let order_number = generate_order_number();
        info!(
            order_number = %order_number,
            total = %quote.total,
            "Order completed"
        );

        Ok(OrderConfirmation {
            order_number,
            email,
            quote,
            placed_at: Utc::now(),
        })
    }
}

/// Check required fields and parse the contact email.
fn validate(form: &CheckoutForm) -> Result<Email, CheckoutError> {
    let required: [(&'static str, &str); 10] = [
        ("first_name", &form.shipping.first_name),
        ("last_name", &form.shipping.last_name),
        ("address", &form.shipping.address),
        ("city", &form.shipping.city),
        ("state", &form.shipping.state),
        ("zip_code", &form.shipping.zip_code),
        ("card_name", &form.payment.card_name),
        ("card_number", &form.payment.card_number),
        ("exp_date", &form.payment.exp_date),
        ("cvv", &form.payment.cvv),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(name));
        }
    }

    Ok(Email::parse(&form.contact.email)?)
}

/// Generate an order number of the form `ORD` + four digits.
fn generate_order_number() -> OrderId {
    let digits: u16 = rand::rng().random_range(0..10_000);
    OrderId::new(format!("ORD{digits:04}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use night_owl_core::{CurrencyCode, ProductId, Quantity};

    use crate::cart::CartItemInput;

    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            contact: ContactInfo {
                email: "night@owl.example".to_owned(),
            },
            shipping: ShippingAddress {
                first_name: "Noct".to_owned(),
                last_name: "Owl".to_owned(),
                address: "1 Midnight Lane".to_owned(),
                city: "Duskfield".to_owned(),
                state: "CA".to_owned(),
                zip_code: "94016".to_owned(),
            },
            payment: PaymentDetails {
                card_name: "Noct Owl".to_owned(),
                card_number: "4242 4242 4242 4242".to_owned(),
                exp_date: "12/28".to_owned(),
                cvv: "123".to_owned(),
            },
            save_info: false,
        }
    }

    fn cart_with_cents(cents: i64) -> CartStore {
        let cart = CartStore::new(CurrencyCode::USD);
        cart.add(CartItemInput {
            product_id: ProductId::new("1"),
            name: "Test Product".to_owned(),
            image: String::new(),
            unit_price: Price::from_cents(cents, CurrencyCode::USD),
            quantity: Quantity::new(1),
            variant: None,
        });
        cart
    }

    fn service(cart: CartStore) -> CheckoutService {
        CheckoutService::new(cart, StorefrontConfig::default())
    }

    #[test]
    fn test_quote_below_threshold_charges_shipping() {
        let checkout = service(cart_with_cents(999));
        let quote = checkout.quote_current();

        assert_eq!(quote.shipping.amount, Decimal::new(599, 2));
        // 9.99 * 0.08 = 0.7992 -> 0.80
        assert_eq!(quote.tax.amount, Decimal::new(80, 2));
        assert_eq!(quote.total.amount, Decimal::new(1678, 2));
    }

    #[test]
    fn test_quote_at_threshold_ships_free() {
        let checkout = service(cart_with_cents(5000));
        let quote = checkout.quote_current();
        assert!(quote.shipping.is_zero());
    }

    #[test]
    fn test_quote_above_threshold_ships_free() {
        let checkout = service(cart_with_cents(7550));
        let quote = checkout.quote_current();
        assert!(quote.shipping.is_zero());
        assert_eq!(quote.tax.amount, Decimal::new(604, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_clears_cart_and_confirms() {
        let cart = cart_with_cents(999);
        let checkout = service(cart.clone());

        let confirmation = checkout
            .submit(&valid_form(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(cart.summary().is_empty());
        assert!(confirmation.order_number.as_str().starts_with("ORD"));
        assert_eq!(confirmation.order_number.as_str().len(), 7);
        assert_eq!(confirmation.email.as_str(), "night@owl.example");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_empty_cart_is_rejected() {
        let checkout = service(CartStore::new(CurrencyCode::USD));
        let err = checkout
            .submit(&valid_form(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_blank_field_is_rejected() {
        let checkout = service(cart_with_cents(999));
        let mut form = valid_form();
        form.shipping.city = "  ".to_owned();

        let err = checkout
            .submit(&form, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingField("city")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_bad_email_is_rejected() {
        let checkout = service(cart_with_cents(999));
        let mut form = valid_form();
        form.contact.email = "not-an-email".to_owned();

        let err = checkout
            .submit(&form, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidEmail(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_leaves_cart_intact() {
        let cart = cart_with_cents(999);
        let checkout = service(cart.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = checkout.submit(&valid_form(), &cancel).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Cancelled));
        assert_eq!(cart.summary().total_items, 1);
    }
}
