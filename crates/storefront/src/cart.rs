//! The cart store.
//!
//! Holds the ordered sequence of cart lines and exposes the operations the
//! listing, detail, cart, sidebar, and checkout surfaces mutate it through.
//! Line identity is `(product id, variant)`: adding a product that is already
//! in the cart with the same variant merges quantities instead of appending a
//! duplicate line.
//!
//! Every mutating operation is a single synchronous critical section and
//! returns the post-mutation [`CartSummary`], so callers always observe the
//! totals their action produced.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use night_owl_core::{CurrencyCode, Price, ProductId, Quantity};

use crate::catalog::Product;

/// A single line in the cart.
///
/// `unit_price` is a snapshot captured at add time; it is never re-read from
/// the catalog, even if the catalog price changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Display name snapshot.
    pub name: String,
    /// Primary image URL snapshot.
    pub image: String,
    /// Unit price snapshot.
    pub unit_price: Price,
    /// Units of this product/variant in the cart.
    pub quantity: Quantity,
    /// Selected variant value (e.g., a size), if the product has variants.
    pub variant: Option<String>,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }

    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            variant: self.variant.clone(),
        }
    }
}

/// Identity of a cart line: product id plus selected variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant: Option<String>,
}

impl LineKey {
    /// Key for a product without a variant selection.
    #[must_use]
    pub fn product(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            variant: None,
        }
    }

    /// Key for a specific variant of a product.
    #[must_use]
    pub fn variant(product_id: impl Into<ProductId>, variant: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            variant: Some(variant.into()),
        }
    }
}

/// Input for [`CartStore::add`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: Price,
    pub quantity: Quantity,
    pub variant: Option<String>,
}

impl CartItemInput {
    /// Build an input from a catalog product, snapshotting name, image, and
    /// price at add time.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity, variant: Option<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity,
            variant,
        }
    }
}

/// Aggregate totals derived from the cart lines.
///
/// Recomputed from the line sequence on every read; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Sum of quantities across all lines.
    pub total_items: u32,
    /// Sum of `unit_price * quantity` across all lines.
    pub subtotal: Price,
}

impl CartSummary {
    /// Summary of an empty cart in the given currency.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            total_items: 0,
            subtotal: Price::zero(currency),
        }
    }

    /// Whether the cart has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

struct CartState {
    lines: Vec<CartLine>,
    /// Slide-over presentation flag. Presentation-only, not business logic.
    open: bool,
    currency: CurrencyCode,
}

/// The cart store.
///
/// A cheaply-cloneable handle over shared state; clones observe the same
/// cart. Pass it explicitly to the surfaces that need it - there is no
/// process-global instance. The cart starts empty and is memory-only: state
/// is lost when the last handle is dropped.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Mutex<CartState>>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CartState {
                lines: Vec::new(),
                open: false,
                currency,
            })),
        }
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same `(product id, variant)` already exists its
    /// quantity is increased by the input quantity (saturating); otherwise a
    /// new line is appended, preserving insertion order. A merge keeps the
    /// original line's price snapshot.
    pub fn add(&self, item: CartItemInput) -> CartSummary {
        let mut state = self.lock();

        if let Some(line) = state
            .lines
            .iter_mut()
            .find(|line| line.product_id == item.product_id && line.variant == item.variant)
        {
            line.quantity = line.quantity.plus(item.quantity);
            debug!(
                product_id = %item.product_id,
                quantity = line.quantity.get(),
                "Merged cart line"
            );
        } else {
            debug!(
                product_id = %item.product_id,
                variant = item.variant.as_deref(),
                "Added cart line"
            );
            state.lines.push(CartLine {
                product_id: item.product_id,
                name: item.name,
                image: item.image,
                unit_price: item.unit_price,
                quantity: item.quantity,
                variant: item.variant,
            });
        }

        summarize(&state)
    }

    /// Remove the line matching `key`.
    ///
    /// Removal is per-`(product id, variant)`, consistent with line identity.
    /// A no-op if no line matches.
    pub fn remove(&self, key: &LineKey) -> CartSummary {
        let mut state = self.lock();
        state
            .lines
            .retain(|line| line.product_id != key.product_id || line.variant != key.variant);
        summarize(&state)
    }

    /// Remove every line for the given product, regardless of variant.
    ///
    /// A no-op if the product is not in the cart.
    pub fn remove_product(&self, product_id: &ProductId) -> CartSummary {
        let mut state = self.lock();
        state.lines.retain(|line| line.product_id != *product_id);
        summarize(&state)
    }

    /// Set the quantity of the line matching `key` to `max(1, quantity)`.
    ///
    /// The floor is clamped here rather than trusted to callers, so a zero
    /// from a decrement button leaves one unit in place. Never removes a
    /// line; a no-op if no line matches.
    pub fn update_quantity(&self, key: &LineKey, quantity: u32) -> CartSummary {
        let mut state = self.lock();
        if let Some(line) = state
            .lines
            .iter_mut()
            .find(|line| line.product_id == key.product_id && line.variant == key.variant)
        {
            line.quantity = Quantity::new(quantity);
        }
        summarize(&state)
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) -> CartSummary {
        let mut state = self.lock();
        state.lines.clear();
        debug!("Cleared cart");
        summarize(&state)
    }

    /// Snapshot of the current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().lines.clone()
    }

    /// Current aggregate totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        summarize(&self.lock())
    }

    /// Whether the slide-over cart is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    /// Open or close the slide-over cart.
    pub fn set_open(&self, open: bool) {
        self.lock().open = open;
    }

    /// Toggle the slide-over cart, returning the new state.
    pub fn toggle_open(&self) -> bool {
        let mut state = self.lock();
        state.open = !state.open;
        state.open
    }

    /// Lock the state, recovering from poisoning.
    ///
    /// No operation can leave the state inconsistent mid-update, so a panic
    /// while holding the lock cannot corrupt the line sequence.
    fn lock(&self) -> std::sync::MutexGuard<'_, CartState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Recompute aggregate totals from the line sequence.
fn summarize(state: &CartState) -> CartSummary {
    let total_items = state
        .lines
        .iter()
        .fold(0u32, |sum, line| sum.saturating_add(line.quantity.get()));
    let subtotal = state
        .lines
        .iter()
        .fold(Price::zero(state.currency), |sum, line| {
            sum.plus(line.total())
        });
    CartSummary {
        total_items,
        subtotal,
    }
}
