//! Product catalog with simulated fetch latency.
//!
//! The [`Catalog`] trait is the seam between the storefront and whatever
//! backs the product data: the bundled [`MockCatalog`] answers from a static
//! in-memory table after a configurable delay, and a real implementation can
//! swap in network I/O without touching the cart or checkout.
//!
//! Lookups are cached with `moka` (5-minute TTL) so a product detail view
//! only pays the simulated latency once.

mod data;

pub use data::sample_products;

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use night_owl_core::{Price, ProductId};

use crate::config::StorefrontConfig;

// =============================================================================
// Domain types
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Average review rating on a 0-5 scale.
    pub rating: f64,
    /// Category the product is listed under.
    pub category: Category,
    /// Primary image URL.
    pub image: String,
    /// Merchandising badge, if any.
    pub badge: Option<Badge>,
    /// Additional gallery image URLs (detail page only; often empty).
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Long-form description, if the product has one.
    pub description: Option<String>,
    /// Variant axis (e.g., size), if the product is sold in variants.
    pub variants: Option<VariantGroup>,
}

impl Product {
    /// The default variant value to preselect on a detail view, if any.
    #[must_use]
    pub fn default_variant(&self) -> Option<&str> {
        self.variants
            .as_ref()
            .and_then(|group| group.options.first())
            .map(|option| option.value.as_str())
    }
}

/// A variant axis on a product (e.g., "Size" with small/medium/large).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Axis name shown to the shopper (e.g., "Size").
    pub name: String,
    /// Selectable options, in display order.
    pub options: Vec<VariantOption>,
}

/// One selectable variant option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Display label (e.g., "Small").
    pub label: String,
    /// Stable value stored on cart lines (e.g., "small").
    pub value: String,
}

/// Merchandising badge shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    New,
    BestSeller,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SnacksSweet,
    SnacksSavory,
    BeveragesCold,
    BeveragesHot,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::SnacksSweet,
        Self::SnacksSavory,
        Self::BeveragesCold,
        Self::BeveragesHot,
    ];

    /// URL-facing slug.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::SnacksSweet => "snacks-sweet",
            Self::SnacksSavory => "snacks-savory",
            Self::BeveragesCold => "beverages-cold",
            Self::BeveragesHot => "beverages-hot",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::SnacksSweet => "Sweet Snacks",
            Self::SnacksSavory => "Savory Snacks",
            Self::BeveragesCold => "Cold Drinks",
            Self::BeveragesHot => "Hot Drinks",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snacks-sweet" => Ok(Self::SnacksSweet),
            "snacks-savory" => Ok(Self::SnacksSavory),
            "beverages-cold" => Ok(Self::BeveragesCold),
            "beverages-hot" => Ok(Self::BeveragesHot),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Price, cheapest first.
    PriceAsc,
    /// Price, most expensive first.
    PriceDesc,
    /// Rating, best first.
    Rating,
    /// Name, A to Z.
    Name,
}

/// Filter and sort parameters for a product listing.
///
/// `None` everywhere (the default) lists the full catalog in table order,
/// which is the storefront's "Featured" ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Restrict to one category.
    pub category: Option<Category>,
    /// Minimum price, inclusive.
    pub min_price: Option<Decimal>,
    /// Maximum price, inclusive.
    pub max_price: Option<Decimal>,
    /// Sort order; `None` preserves table order.
    pub sort: Option<SortKey>,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the given id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The caller cancelled the lookup before it completed.
    #[error("catalog lookup cancelled")]
    Cancelled,
}

// =============================================================================
// Catalog trait
// =============================================================================

/// Source of product data.
///
/// Callers pass a [`CancellationToken`] so an abandoned view (the shopper
/// navigated away) can cancel an in-flight lookup instead of leaving a
/// dangling timer that completes into nowhere.
pub trait Catalog: Send + Sync {
    /// List products matching `query`.
    fn products(
        &self,
        query: &ProductQuery,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch a single product by id.
    fn product(
        &self,
        id: &ProductId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

// =============================================================================
// MockCatalog
// =============================================================================

/// In-memory catalog that simulates fetch latency.
///
/// Backed by the static sample table; every uncached lookup sleeps for the
/// configured delay before answering, standing in for network I/O.
#[derive(Clone)]
pub struct MockCatalog {
    products: Vec<Product>,
    delay: Duration,
    cache: Cache<ProductId, Product>,
}

impl MockCatalog {
    /// Create a catalog over the bundled sample products.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_products(sample_products(config.currency), config.catalog_fetch_delay)
    }

    /// Create a catalog over an explicit product table (used by tests).
    #[must_use]
    pub fn with_products(products: Vec<Product>, delay: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            products,
            delay,
            cache,
        }
    }

    /// Sleep for the simulated latency, bailing out if cancelled first.
    async fn simulate_latency(&self, cancel: &CancellationToken) -> Result<(), CatalogError> {
        tokio::select! {
            () = cancel.cancelled() => Err(CatalogError::Cancelled),
            () = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}

impl Catalog for MockCatalog {
    #[instrument(skip(self, cancel))]
    async fn products(
        &self,
        query: &ProductQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.simulate_latency(cancel).await?;

        let mut result: Vec<Product> = self
            .products
            .iter()
            .filter(|product| {
                query
                    .category
                    .is_none_or(|category| product.category == category)
            })
            .filter(|product| {
                query
                    .min_price
                    .is_none_or(|min| product.price.amount >= min)
            })
            .filter(|product| {
                query
                    .max_price
                    .is_none_or(|max| product.price.amount <= max)
            })
            .cloned()
            .collect();

        match query.sort {
            Some(SortKey::PriceAsc) => {
                result.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
            }
            Some(SortKey::PriceDesc) => {
                result.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
            Some(SortKey::Rating) => result.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Some(SortKey::Name) => result.sort_by(|a, b| a.name.cmp(&b.name)),
            None => {} // "Featured": table order
        }

        debug!(count = result.len(), "Listed products");
        Ok(result)
    }

    #[instrument(skip(self, cancel))]
    async fn product(
        &self,
        id: &ProductId,
        cancel: &CancellationToken,
    ) -> Result<Product, CatalogError> {
        if let Some(hit) = self.cache.get(id).await {
            debug!(product_id = %id, "Catalog cache hit");
            return Ok(hit);
        }

        self.simulate_latency(cancel).await?;

        let product = self
            .products
            .iter()
            .find(|product| product.id == *id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        self.cache.insert(id.clone(), product.clone()).await;
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use night_owl_core::CurrencyCode;

    use super::*;

    fn catalog() -> MockCatalog {
        MockCatalog::with_products(
            sample_products(CurrencyCode::USD),
            Duration::from_millis(800),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_lookup_finds_sample() {
        let catalog = catalog();
        let product = catalog
            .product(&ProductId::new("1"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(product.name, "Chocolate Chip Cookies");
        assert_eq!(product.price, Price::from_cents(999, CurrencyCode::USD));
        assert_eq!(product.default_variant(), Some("small"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_lookup_missing_id() {
        let catalog = catalog();
        let err = catalog
            .product(&ProductId::new("999"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_lookup_returns_cancelled() {
        let catalog = catalog();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = catalog
            .product(&ProductId::new("1"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_lookup_is_cached() {
        let catalog = catalog();
        let id = ProductId::new("2");
        let token = CancellationToken::new();

        let start = tokio::time::Instant::now();
        catalog.product(&id, &token).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));

        // Cached: answers without paying the latency again, even when the
        // caller has already cancelled.
        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let product = catalog.product(&id, &cancelled).await.unwrap();
        assert_eq!(product.name, "Mixed Nuts Premium");
    }

    #[tokio::test(start_paused = true)]
    async fn test_category_filter() {
        let catalog = catalog();
        let query = ProductQuery {
            category: Some(Category::BeveragesHot),
            ..ProductQuery::default()
        };

        let products = catalog
            .products(&query, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(products.len(), 2);
        assert!(
            products
                .iter()
                .all(|p| p.category == Category::BeveragesHot)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_filter_bounds_inclusive() {
        let catalog = catalog();
        let query = ProductQuery {
            min_price: Some(Decimal::new(999, 2)),
            max_price: Some(Decimal::new(999, 2)),
            ..ProductQuery::default()
        };

        let products = catalog
            .products(&query, &CancellationToken::new())
            .await
            .unwrap();
        assert!(!products.is_empty());
        assert!(
            products
                .iter()
                .all(|p| p.price.amount == Decimal::new(999, 2))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_price_ascending() {
        let catalog = catalog();
        let query = ProductQuery {
            sort: Some(SortKey::PriceAsc),
            ..ProductQuery::default()
        };

        let products = catalog
            .products(&query, &CancellationToken::new())
            .await
            .unwrap();
        let prices: Vec<_> = products.iter().map(|p| p.price.amount).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sort_preserves_table_order() {
        let catalog = catalog();
        let products = catalog
            .products(&ProductQuery::default(), &CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<_> = products.iter().map(|p| p.id.as_str().to_owned()).collect();
        let expected: Vec<_> = (1..=12).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_category_slug_round_trip() {
        for category in Category::ALL {
            let parsed: Category = category.slug().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }
}
