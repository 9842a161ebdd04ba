//! Mocked account area: order history and wishlist.
//!
//! Order history is a static sample table (nothing placed through checkout
//! is persisted into it); the wishlist is a shared in-memory set of product
//! ids toggled from the detail page's heart button.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use night_owl_core::{CurrencyCode, OrderId, OrderStatus, Price, ProductId, Quantity};

// =============================================================================
// Order history
// =============================================================================

/// A line snapshot on a past order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
    pub image: String,
}

/// A past order shown in the account area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub placed_on: NaiveDate,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<OrderItem>,
}

fn order_item(id: &str, name: &str, cents: i64, quantity: u32, image: &str) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(id),
        name: name.to_owned(),
        unit_price: Price::from_cents(cents, CurrencyCode::USD),
        quantity: Quantity::new(quantity),
        image: image.to_owned(),
    }
}

/// The sample order history, newest first.
#[must_use]
pub fn order_history() -> Vec<OrderRecord> {
    vec![
        OrderRecord {
            id: OrderId::new("ORD12345"),
            placed_on: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap_or_default(),
            status: OrderStatus::Delivered,
            total: Price::from_cents(3796, CurrencyCode::USD),
            items: vec![
                order_item(
                    "1",
                    "Chocolate Chip Cookies",
                    999,
                    2,
                    "https://images.pexels.com/photos/230325/pexels-photo-230325.jpeg",
                ),
                order_item(
                    "4",
                    "Iced Coffee",
                    499,
                    1,
                    "https://images.pexels.com/photos/2638019/pexels-photo-2638019.jpeg",
                ),
                order_item(
                    "2",
                    "Mixed Nuts Premium",
                    1299,
                    1,
                    "https://images.pexels.com/photos/1295572/pexels-photo-1295572.jpeg",
                ),
            ],
        },
        OrderRecord {
            id: OrderId::new("ORD12346"),
            placed_on: NaiveDate::from_ymd_opt(2023, 4, 28).unwrap_or_default(),
            status: OrderStatus::Delivered,
            total: Price::from_cents(2197, CurrencyCode::USD),
            items: vec![
                order_item(
                    "3",
                    "Potato Chips Sea Salt",
                    499,
                    3,
                    "https://images.pexels.com/photos/568805/pexels-photo-568805.jpeg",
                ),
                order_item(
                    "5",
                    "Energy Drink",
                    350,
                    2,
                    "https://images.pexels.com/photos/2668308/pexels-photo-2668308.jpeg",
                ),
            ],
        },
    ]
}

// =============================================================================
// Wishlist
// =============================================================================

/// Insertion-ordered set of wishlisted product ids.
///
/// Cheaply-cloneable handle over shared state, like the cart store.
/// Memory-only.
#[derive(Clone, Default)]
pub struct Wishlist {
    inner: Arc<Mutex<Vec<ProductId>>>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a product on the wishlist.
    ///
    /// Returns `true` if the product is wishlisted after the call.
    pub fn toggle(&self, product_id: &ProductId) -> bool {
        let mut items = self.lock();
        if let Some(pos) = items.iter().position(|id| id == product_id) {
            items.remove(pos);
            false
        } else {
            items.push(product_id.clone());
            true
        }
    }

    /// Remove a product. A no-op if it is not wishlisted.
    pub fn remove(&self, product_id: &ProductId) {
        self.lock().retain(|id| id != product_id);
    }

    /// Whether the product is wishlisted.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.lock().iter().any(|id| id == product_id)
    }

    /// Snapshot of the wishlisted ids, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<ProductId> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProductId>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
