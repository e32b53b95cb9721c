//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::catalog::{Product, ProductQuery, RELATED_COUNT, SortKey, Testimonial};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Product card data for grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub category_name: String,
    pub image: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub rating: String,
    pub review_count: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            slug: product.slug.to_string(),
            name: product.name.clone(),
            category_name: product.category.name.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.map(|p| p.to_string()),
            discount_percent: product.discount_percent(),
            rating: product.rating.to_string(),
            review_count: product.review_count,
            in_stock: product.in_stock(),
        }
    }
}

/// Review data for the product page.
#[derive(Clone)]
pub struct TestimonialView {
    pub name: String,
    pub rating: String,
    pub comment: String,
    pub date: String,
    pub verified: bool,
}

impl From<&Testimonial> for TestimonialView {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            name: testimonial.name.clone(),
            rating: testimonial.rating.to_string(),
            comment: testimonial.comment.clone(),
            date: testimonial.date.format("%d/%m/%Y").to_string(),
            verified: testimonial.verified,
        }
    }
}

/// Full product data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub description: String,
    pub category_slug: String,
    pub composition: Vec<String>,
    pub usage: String,
    pub benefits: Vec<String>,
    pub stock: u32,
    pub testimonials: Vec<TestimonialView>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            card: ProductCardView::from(product),
            description: product.description.clone(),
            category_slug: product.category.slug.to_string(),
            composition: product.composition.clone(),
            usage: product.usage.clone(),
            benefits: product.benefits.clone(),
            stock: product.stock,
            testimonials: product.testimonials.iter().map(TestimonialView::from).collect(),
        }
    }
}

/// Sort dropdown entry.
#[derive(Clone)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Category checkbox entry.
#[derive(Clone)]
pub struct CategoryFilterView {
    pub slug: String,
    pub name: String,
    pub product_count: usize,
    pub checked: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: PageContext,
    pub products: Vec<ProductCardView>,
    pub search: String,
    pub min_price: String,
    pub max_price: String,
    pub sort_options: Vec<SortOptionView>,
    pub category_filters: Vec<CategoryFilterView>,
    pub is_filtered: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub detail: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
}

/// Unknown product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub page: PageContext,
    pub slug: String,
}

/// Display product listing page.
///
/// Query parameters: `q`, `category` (repeatable), `min`, `max`, `sort`.
#[instrument(skip(state, page))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let query = ProductQuery::from_pairs(params);
    let catalog = state.catalog();

    let products: Vec<ProductCardView> = catalog
        .search(&query)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    tracing::debug!(results = products.len(), "catalog filtered");

    let sort_options = SortKey::ALL
        .into_iter()
        .map(|key| SortOptionView {
            value: key.as_str(),
            label: key.label(),
            selected: key == query.sort,
        })
        .collect();

    let category_filters = catalog
        .categories()
        .iter()
        .map(|category| CategoryFilterView {
            slug: category.slug.to_string(),
            name: category.name.clone(),
            product_count: category.product_count,
            checked: query.has_category(category.slug.as_str()),
        })
        .collect();

    ProductsIndexTemplate {
        page,
        products,
        search: query.search.clone(),
        min_price: query.min_price.amount().to_string(),
        max_price: query.max_price.amount().to_string(),
        sort_options,
        category_filters,
        is_filtered: query.is_filtered(),
    }
}

/// Display product detail page, or a 404 page for an unknown slug.
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(slug): Path<String>,
) -> Response {
    let catalog = state.catalog();
    let Some(product) = catalog.product_by_slug(&slug) else {
        tracing::debug!(%slug, "product not found");
        return (StatusCode::NOT_FOUND, ProductNotFoundTemplate { page, slug }).into_response();
    };

    let related_products = catalog
        .related(product, RELATED_COUNT)
        .map(ProductCardView::from)
        .collect();

    ProductShowTemplate {
        page,
        detail: ProductDetailView::from(product),
        related_products,
    }
    .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use naturindo_core::Price;

    use super::*;
    use crate::catalog::tests::{category, product};

    #[test]
    fn test_card_view_formats_prices() {
        let jamu = category(1, "jamu");
        let mut kunyit = product(1, "kunyit-asam", &jamu, 35_000);
        kunyit.original_price = Some(Price::from_rupiah(50_000));

        let card = ProductCardView::from(&kunyit);
        assert_eq!(card.price, "Rp 35.000");
        assert_eq!(card.original_price.as_deref(), Some("Rp 50.000"));
        assert_eq!(card.discount_percent, Some(30));
        assert_eq!(card.rating, "4.5");
        assert!(card.in_stock);
    }
}
