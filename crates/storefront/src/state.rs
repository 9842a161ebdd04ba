//! Application state shared across storefront surfaces.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{Catalog, MockCatalog};
use crate::checkout::CheckoutService;
use crate::config::StorefrontConfig;
use crate::services::account::Wishlist;
use crate::services::auth::AuthService;

/// Application state shared across all storefront surfaces.
///
/// This struct is cheaply cloneable via `Arc` and is the single object a
/// frontend passes around: listing and detail views reach the catalog and
/// cart through it, the cart and sidebar views the cart and checkout, the
/// account views auth and the wishlist. Generic over the catalog so a real
/// product backend can replace the mock without touching anything else.
pub struct AppState<C = MockCatalog> {
    inner: Arc<AppStateInner<C>>,
}

struct AppStateInner<C> {
    config: StorefrontConfig,
    catalog: C,
    cart: CartStore,
    checkout: CheckoutService,
    auth: AuthService,
    wishlist: Wishlist,
}

impl AppState<MockCatalog> {
    /// Create application state over the bundled mock catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = MockCatalog::new(&config);
        Self::with_catalog(config, catalog)
    }
}

impl<C: Catalog> AppState<C> {
    /// Create application state over an explicit catalog implementation.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: C) -> Self {
        let cart = CartStore::new(config.currency);
        let checkout = CheckoutService::new(cart.clone(), config.clone());
        let auth = AuthService::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                checkout,
                auth,
                wishlist: Wishlist::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the wishlist.
    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.inner.wishlist
    }
}

// Manual impl: `derive(Clone)` would require `C: Clone`, but clones share
// the same `Arc`ed inner regardless of the catalog type.
impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use night_owl_core::{CurrencyCode, Price, ProductId, Quantity};
    use tokio_util::sync::CancellationToken;

    use crate::cart::CartItemInput;
    use crate::catalog::Catalog;

    use super::*;

    #[test]
    fn test_clones_share_cart() {
        let state = AppState::new(StorefrontConfig::default());
        let view = state.clone();

        state.cart().add(CartItemInput {
            product_id: ProductId::new("1"),
            name: "Test".to_owned(),
            image: String::new(),
            unit_price: Price::from_cents(999, CurrencyCode::USD),
            quantity: Quantity::new(1),
            variant: None,
        });

        assert_eq!(view.cart().summary().total_items, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_wires_catalog() {
        let state = AppState::new(StorefrontConfig::default());
        let product = state
            .catalog()
            .product(&ProductId::new("1"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(product.name, "Chocolate Chip Cookies");
    }
}
