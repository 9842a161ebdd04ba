//! The bundled sample product table.
//!
//! Stands in for a real product backend. Ids are stable strings ("1"-"12")
//! and prices are built in whatever currency the storefront is configured
//! for.

use night_owl_core::{CurrencyCode, Price, ProductId};

use super::{Badge, Category, Product, VariantGroup, VariantOption};

fn product(
    id: &str,
    name: &str,
    cents: i64,
    rating: f64,
    category: Category,
    image: &str,
    badge: Option<Badge>,
    currency: CurrencyCode,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_cents(cents, currency),
        rating,
        category,
        image: image.to_owned(),
        badge,
        gallery: Vec::new(),
        description: None,
        variants: None,
    }
}

/// The full sample catalog, in table (i.e. "Featured") order.
#[must_use]
pub fn sample_products(currency: CurrencyCode) -> Vec<Product> {
    let mut products = vec![
        product(
            "1",
            "Chocolate Chip Cookies",
            999,
            4.5,
            Category::SnacksSweet,
            "https://images.pexels.com/photos/230325/pexels-photo-230325.jpeg",
            Some(Badge::New),
            currency,
        ),
        product(
            "2",
            "Mixed Nuts Premium",
            1299,
            4.7,
            Category::SnacksSavory,
            "https://images.pexels.com/photos/1295572/pexels-photo-1295572.jpeg",
            Some(Badge::BestSeller),
            currency,
        ),
        product(
            "3",
            "Potato Chips Sea Salt",
            499,
            4.2,
            Category::SnacksSavory,
            "https://images.pexels.com/photos/568805/pexels-photo-568805.jpeg",
            None,
            currency,
        ),
        product(
            "4",
            "Iced Coffee",
            499,
            4.3,
            Category::BeveragesCold,
            "https://images.pexels.com/photos/2638019/pexels-photo-2638019.jpeg",
            Some(Badge::BestSeller),
            currency,
        ),
        product(
            "5",
            "Energy Drink",
            350,
            4.0,
            Category::BeveragesCold,
            "https://images.pexels.com/photos/2668308/pexels-photo-2668308.jpeg",
            None,
            currency,
        ),
        product(
            "6",
            "Hot Chocolate",
            399,
            4.6,
            Category::BeveragesHot,
            "https://images.pexels.com/photos/312418/pexels-photo-312418.jpeg",
            Some(Badge::New),
            currency,
        ),
        product(
            "7",
            "Berry Smoothie",
            699,
            4.8,
            Category::BeveragesCold,
            "https://images.pexels.com/photos/1291712/pexels-photo-1291712.jpeg",
            Some(Badge::BestSeller),
            currency,
        ),
        product(
            "8",
            "Caramel Popcorn",
            549,
            4.4,
            Category::SnacksSweet,
            "https://images.pexels.com/photos/33129/popcorn-movie-party-entertainment.jpg",
            None,
            currency,
        ),
        product(
            "9",
            "Green Tea",
            299,
            4.1,
            Category::BeveragesHot,
            "https://images.pexels.com/photos/1417945/pexels-photo-1417945.jpeg",
            None,
            currency,
        ),
        product(
            "10",
            "Salted Pretzels",
            399,
            4.3,
            Category::SnacksSavory,
            "https://images.pexels.com/photos/959922/pexels-photo-959922.jpeg",
            None,
            currency,
        ),
        product(
            "11",
            "Chocolate Milkshake",
            599,
            4.7,
            Category::BeveragesCold,
            "https://images.pexels.com/photos/3625372/pexels-photo-3625372.jpeg",
            None,
            currency,
        ),
        product(
            "12",
            "Dark Chocolate Bar",
            699,
            4.5,
            Category::SnacksSweet,
            "https://images.pexels.com/photos/65882/chocolate-dark-coffee-confiserie-65882.jpeg",
            Some(Badge::BestSeller),
            currency,
        ),
    ];

    // The cookies carry the detail-page extras: a gallery and a size axis.
    if let Some(cookies) = products.first_mut() {
        cookies.gallery = vec![
            "https://images.pexels.com/photos/230325/pexels-photo-230325.jpeg".to_owned(),
            "https://images.pexels.com/photos/6823409/pexels-photo-6823409.jpeg".to_owned(),
            "https://images.pexels.com/photos/1028714/pexels-photo-1028714.jpeg".to_owned(),
        ];
        cookies.description =
            Some("Classic chocolate chip cookies, baked fresh and packed the same day.".to_owned());
        cookies.variants = Some(VariantGroup {
            name: "Size".to_owned(),
            options: vec![
                VariantOption {
                    label: "Small".to_owned(),
                    value: "small".to_owned(),
                },
                VariantOption {
                    label: "Medium".to_owned(),
                    value: "medium".to_owned(),
                },
                VariantOption {
                    label: "Large".to_owned(),
                    value: "large".to_owned(),
                },
            ],
        });
    }

    products
}
