//! Static product catalog.
//!
//! The catalog is reference data: it is built once at startup from the seed
//! in [`seed`] and never mutated afterwards. Handlers borrow it through
//! [`AppState::catalog`](crate::state::AppState::catalog).

pub mod filter;
pub mod seed;

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use naturindo_core::{CategoryId, Price, ProductId, Rating, Slug, TestimonialId};

pub use filter::{ProductQuery, SortKey};

/// Number of products shown in the home page "featured" strip.
pub const FEATURED_COUNT: usize = 4;

/// Number of related products shown on a product page.
pub const RELATED_COUNT: usize = 4;

/// Errors detected while assembling the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid slug in seed data: {0}")]
    InvalidSlug(#[from] naturindo_core::SlugError),
    #[error("duplicate product {0}")]
    DuplicateProduct(String),
    #[error("duplicate category {0}")]
    DuplicateCategory(String),
    #[error("product {product} references unknown category {category}")]
    UnknownCategory { product: String, category: CategoryId },
}

/// A product category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    /// Emoji glyph shown on the category grid.
    pub icon: String,
    /// Number of catalog products in this category, derived at build time.
    pub product_count: usize,
}

/// The owning category as seen from a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
}

/// A customer review shown on the product page.
#[derive(Debug, Clone)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub rating: Rating,
    pub comment: String,
    pub date: NaiveDate,
    pub verified: bool,
}

/// A product in the catalog.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, shown struck through when present.
    pub original_price: Option<Price>,
    pub image: String,
    pub category: CategoryRef,
    pub rating: Rating,
    pub review_count: u32,
    pub composition: Vec<String>,
    pub usage: String,
    pub benefits: Vec<String>,
    pub stock: u32,
    pub testimonials: Vec<Testimonial>,
}

impl Product {
    /// Discount relative to the original price, in whole percent.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| self.price.discount_percent(original))
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A home page hero carousel slide.
#[derive(Debug, Clone)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub cta_text: String,
    pub cta_link: String,
    /// Promotional slide, labelled as an advertisement.
    pub is_ad: bool,
}

/// Immutable catalog of products, categories, and hero slides.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    hero_slides: Vec<HeroSlide>,
}

impl Catalog {
    /// Assemble a catalog, deriving category product counts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if product or category IDs/slugs repeat, or a
    /// product points at a category that does not exist.
    pub fn new(
        mut categories: Vec<Category>,
        products: Vec<Product>,
        hero_slides: Vec<HeroSlide>,
    ) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        let mut category_slugs = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id) || !category_slugs.insert(category.slug.clone()) {
                return Err(CatalogError::DuplicateCategory(category.slug.to_string()));
            }
        }

        let mut product_ids = HashSet::new();
        let mut product_slugs = HashSet::new();
        for product in &products {
            if !product_ids.insert(product.id) || !product_slugs.insert(product.slug.clone()) {
                return Err(CatalogError::DuplicateProduct(product.slug.to_string()));
            }
            if !category_ids.contains(&product.category.id) {
                return Err(CatalogError::UnknownCategory {
                    product: product.slug.to_string(),
                    category: product.category.id,
                });
            }
        }

        for category in &mut categories {
            category.product_count = products
                .iter()
                .filter(|p| p.category.id == category.id)
                .count();
        }

        Ok(Self {
            products,
            categories,
            hero_slides,
        })
    }

    /// The built-in NaturIndo catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the seed data is inconsistent.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::new(seed::categories()?, seed::products()?, seed::hero_slides())
    }

    /// All products, in featured (seed) order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn hero_slides(&self) -> &[HeroSlide] {
        &self.hero_slides
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == *slug)
    }

    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == *slug)
    }

    /// The first `n` products in featured order.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        let end = n.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    /// Up to `n` other products from the same category, in featured order.
    pub fn related<'a>(
        &'a self,
        product: &'a Product,
        n: usize,
    ) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| p.category.id == product.category.id && p.id != product.id)
            .take(n)
    }

    /// Filter and sort products for the catalog page.
    #[must_use]
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        filter::apply(&self.products, query)
    }
}
