//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Mutations are plain form posts
//! that redirect back with a flash notification.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use naturindo_core::ProductId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{PageContext, set_flash};
use crate::models::{Cart, CartItem, Flash};
use crate::services::CartStore;
use crate::state::AppState;

const CART_PATH: &str = "/cart";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub slug: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.as_i32(),
            slug: item.product.slug.to_string(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            price: item.product.price.to_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
    pub total_price: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price().to_string(),
        }
    }
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Form data for adding to cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
    /// Local path to return to; defaults to the cart page.
    pub redirect: Option<String>,
}

/// Form data for setting a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i64,
}

/// Form data for removing a line.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Only same-site absolute paths are accepted as redirect targets.
fn local_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => CART_PATH,
    }
}

/// Display cart page.
#[instrument(skip(session, page))]
pub async fn show(session: Session, page: PageContext) -> Result<impl IntoResponse> {
    let cart = CartStore::new(&session).load().await?;

    Ok(CartShowTemplate {
        page,
        cart: CartView::from(&cart),
    })
}

/// Add a product to the cart.
///
/// Unknown products are a 404; out-of-stock products are refused with an
/// error notification.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .product(ProductId::new(form.product_id))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let redirect_to = local_redirect(form.redirect.as_deref());

    if !product.in_stock() {
        set_flash(&session, Flash::error(format!("{} sedang habis", product.name))).await;
        return Ok(Redirect::to(redirect_to));
    }

    CartStore::new(&session)
        .update(|cart| cart.add_item(product, quantity))
        .await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    set_flash(
        &session,
        Flash::success(format!("{} ditambahkan ke keranjang", product.name)),
    )
    .await;

    Ok(Redirect::to(redirect_to))
}

/// Set a line's quantity. Zero or below removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    CartStore::new(&session)
        .update(|cart| cart.update_quantity(ProductId::new(form.product_id), form.quantity))
        .await?;

    let product_id = form.product_id.to_string();
    let quantity = form.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.as_str()),
        ]),
    );

    Ok(Redirect::to(CART_PATH))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let (_, removed) = CartStore::new(&session)
        .update(|cart| cart.remove_item(ProductId::new(form.product_id)))
        .await?;

    if removed {
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
        set_flash(&session, Flash::info("Produk dihapus dari keranjang")).await;
    }

    Ok(Redirect::to(CART_PATH))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    CartStore::new(&session).clear().await?;
    add_breadcrumb("cart", "Cleared cart", None);
    set_flash(&session, Flash::info("Keranjang dikosongkan")).await;
    Ok(Redirect::to(CART_PATH))
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = CartStore::new(&session).load().await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}
