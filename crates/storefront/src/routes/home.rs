//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::{Category, FEATURED_COUNT, HeroSlide};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

use super::products::ProductCardView;

/// A "why choose us" selling point.
#[derive(Clone, Copy)]
pub struct SellingPoint {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

const SELLING_POINTS: [SellingPoint; 4] = [
    SellingPoint {
        icon: "🌱",
        title: "100% Alami",
        text: "Bahan herbal pilihan tanpa pengawet kimia",
    },
    SellingPoint {
        icon: "✅",
        title: "Terdaftar BPOM",
        text: "Setiap produk telah lolos uji keamanan",
    },
    SellingPoint {
        icon: "🚚",
        title: "Pengiriman Cepat",
        text: "Dikirim ke seluruh Indonesia dalam 1-3 hari",
    },
    SellingPoint {
        icon: "💬",
        title: "Konsultasi Gratis",
        text: "Tanya herbalis kami kapan saja",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub slides: Vec<HeroSlide>,
    pub categories: Vec<Category>,
    pub featured_products: Vec<ProductCardView>,
    pub selling_points: &'static [SellingPoint],
}

/// Display the home page.
#[instrument(skip(state, page))]
pub async fn home(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    let catalog = state.catalog();

    HomeTemplate {
        page,
        slides: catalog.hero_slides().to_vec(),
        categories: catalog.categories().to_vec(),
        featured_products: catalog
            .featured(FEATURED_COUNT)
            .iter()
            .map(ProductCardView::from)
            .collect(),
        selling_points: &SELLING_POINTS,
    }
}
