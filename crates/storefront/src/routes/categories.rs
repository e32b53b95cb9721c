//! Category listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::Category;
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub page: PageContext,
    pub categories: Vec<Category>,
}

/// Display all categories. Each links to the catalog filtered to it.
#[instrument(skip(state, page))]
pub async fn index(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    CategoriesIndexTemplate {
        page,
        categories: state.catalog().categories().to_vec(),
    }
}
