//! Checkout route handlers.
//!
//! Checkout requires a signed-in user and a non-empty cart. Submitting the
//! shipping form places an order, empties the cart, and redirects to the
//! confirmation page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use naturindo_core::{OrderId, PaymentMethod};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{PageContext, RequireAuth, set_flash};
use crate::models::{Cart, Flash, Order, session_keys};
use crate::services::checkout::INCOMPLETE_SHIPPING;
use crate::services::{CartStore, CheckoutError, CheckoutForm};
use crate::state::AppState;

use super::cart::CartView;

/// Payment method radio option.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub checked: bool,
}

fn payment_options(selected: &str) -> Vec<PaymentOptionView> {
    PaymentMethod::ALL
        .into_iter()
        .map(|method| PaymentOptionView {
            value: method.as_str(),
            label: method.display_name(),
            description: method.description(),
            checked: method.as_str() == selected,
        })
        .collect()
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub form: CheckoutForm,
    pub payment_options: Vec<PaymentOptionView>,
    pub cart: CartView,
    /// Banner shown above the form after a rejected submission.
    pub error: Option<String>,
}

impl CheckoutTemplate {
    fn new(page: PageContext, form: CheckoutForm, cart: &Cart, error: Option<String>) -> Self {
        Self {
            page,
            payment_options: payment_options(&form.payment_method),
            form,
            cart: CartView::from(cart),
            error,
        }
    }
}

/// Order summary shown after checkout.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub number: String,
    pub total: String,
    pub total_items: u64,
    pub payment_method: String,
    pub status: String,
    pub shipping_name: String,
    pub shipping_address: String,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number(),
            total: order.total.to_string(),
            total_items: order.total_items(),
            payment_method: order.payment_method.display_name().to_string(),
            status: order.status.label().to_string(),
            shipping_name: order.shipping.name.clone(),
            shipping_address: order.shipping.address.clone(),
        }
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct OrderSuccessTemplate {
    pub page: PageContext,
    pub order: Option<OrderSummaryView>,
}

/// Display the checkout form.
#[instrument(skip(session, page, user), fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    session: Session,
    page: PageContext,
) -> Result<Response> {
    let cart = CartStore::new(&session).load().await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok(CheckoutTemplate::new(page, CheckoutForm::for_user(&user), &cart, None).into_response())
}

/// Place the order.
///
/// Missing shipping data re-renders the form with a 422. A second
/// submission while the first is still processing is a 409.
#[instrument(skip(state, session, page, user, form), fields(user_id = %user.id))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    page: PageContext,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let store = CartStore::new(&session);
    let cart = store.load().await?;

    let order = match state.checkout().place_order(&user, &cart, &form).await {
        Ok(order) => order,
        Err(CheckoutError::EmptyCart) => return Ok(Redirect::to("/cart").into_response()),
        Err(CheckoutError::Validation(_)) => {
            let error = Some(INCOMPLETE_SHIPPING.to_string());
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutTemplate::new(page, form, &cart, error),
            )
                .into_response());
        }
        Err(CheckoutError::InvalidPaymentMethod(e)) => {
            tracing::debug!("rejected payment method: {e}");
            let error = Some("Pilih metode pembayaran yang tersedia".to_string());
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutTemplate::new(page, form, &cart, error),
            )
                .into_response());
        }
        Err(e) => return Err(AppError::from(e)),
    };

    store.clear().await?;
    session.insert(session_keys::LAST_ORDER_ID, order.id).await?;

    let order_id = order.id.to_string();
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order_id.as_str())]));
    set_flash(&session, Flash::success("Pesanan berhasil dibuat!")).await;

    Ok(Redirect::to("/order-success").into_response())
}

/// Display the most recent order placed in this session.
#[instrument(skip(state, session, page))]
pub async fn order_success(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
) -> Result<impl IntoResponse> {
    let order = session
        .get::<OrderId>(session_keys::LAST_ORDER_ID)
        .await?
        .and_then(|id| state.orders().get(id));

    Ok(OrderSuccessTemplate {
        page,
        order: order.as_ref().map(OrderSummaryView::from),
    })
}
