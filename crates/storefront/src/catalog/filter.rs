//! Catalog page filtering and sorting.
//!
//! [`apply`] is a pure function of the product list and a [`ProductQuery`].
//! Filters run in order (search text, categories, price range) and the
//! survivors are sorted with a stable sort, so equal keys keep their
//! featured order.

use naturindo_core::Price;

use super::Product;

/// Lower bound of the price slider.
pub const DEFAULT_MIN_PRICE: u64 = 0;

/// Upper bound of the price slider.
pub const DEFAULT_MAX_PRICE: u64 = 300_000;

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Seed order, no reordering.
    #[default]
    Featured,
    /// Reverse of seed order.
    Newest,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Descending rating.
    Rating,
}

impl SortKey {
    /// All sort keys, in the order the sort dropdown lists them.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::Newest,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
    ];

    /// Parse a URL value; anything unrecognised falls back to `Featured`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Unggulan",
            Self::Newest => "Terbaru",
            Self::PriceLow => "Harga Terendah",
            Self::PriceHigh => "Harga Tertinggi",
            Self::Rating => "Rating Tertinggi",
        }
    }
}

/// Catalog page filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring matched against name or description.
    pub search: String,
    /// Selected category slugs; empty means all categories.
    pub categories: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    pub sort: SortKey,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            min_price: Price::from_rupiah(DEFAULT_MIN_PRICE),
            max_price: Price::from_rupiah(DEFAULT_MAX_PRICE),
            sort: SortKey::Featured,
        }
    }
}

impl ProductQuery {
    /// Build a query from decoded URL pairs (`q`, `category`, `min`, `max`,
    /// `sort`).
    ///
    /// `category` may repeat. Unparseable prices keep their defaults;
    /// unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "q" => value.clone_into(&mut query.search),
                "category" if !value.is_empty() => {
                    if !query.has_category(value) {
                        query.categories.push(value.to_owned());
                    }
                }
                "min" => {
                    if let Ok(min) = value.parse::<u64>() {
                        query.min_price = Price::from_rupiah(min);
                    }
                }
                "max" => {
                    if let Ok(max) = value.parse::<u64>() {
                        query.max_price = Price::from_rupiah(max);
                    }
                }
                "sort" => query.sort = SortKey::parse(value),
                _ => {}
            }
        }
        query
    }

    #[must_use]
    pub fn has_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c == slug)
    }

    /// Whether anything differs from the unfiltered default view.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        let default = Self::default();
        !self.search.is_empty()
            || !self.categories.is_empty()
            || self.min_price != default.min_price
            || self.max_price != default.max_price
    }

    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = product.name.to_lowercase().contains(needle)
                || product.description.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.has_category(product.category.slug.as_str()) {
            return false;
        }

        self.min_price <= product.price && product.price <= self.max_price
    }
}

/// Filter and sort `products` according to `query`.
#[must_use]
pub fn apply<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    let needle = query.search.trim().to_lowercase();
    let needle = (!needle.is_empty()).then_some(needle.as_str());

    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| query.matches(p, needle))
        .collect();

    match query.sort {
        SortKey::Featured => {}
        SortKey::Newest => result.reverse(),
        SortKey::PriceLow => result.sort_by_key(|p| p.price),
        SortKey::PriceHigh => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => result.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }

    result
}
