//! Per-page layout context.
//!
//! Every page renders the navbar (cart badge, signed-in name) and any pending
//! flash notification. [`PageContext`] gathers those from the session in one
//! extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::Flash;
use crate::services::CartStore;

use super::auth::current_user;
use super::flash::take_flash;

/// Layout data shared by every full page template.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub cart_count: u64,
    pub user_name: Option<String>,
    pub flash: Option<Flash>,
}

impl PageContext {
    /// Build the context from `session`, consuming any pending flash.
    pub async fn load(session: &Session) -> Self {
        let cart_count = CartStore::new(session)
            .load()
            .await
            .map(|cart| cart.total_items())
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load cart from session: {e}");
                0
            });
        let user_name = current_user(session)
            .await
            .map(|user| user.display_name().to_owned());

        Self {
            cart_count,
            user_name,
            flash: take_flash(session).await,
        }
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user_name.is_some()
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match parts.extensions.get::<Session>() {
            Some(session) => Self::load(session).await,
            None => {
                tracing::warn!("Session not found in request extensions");
                Self::default()
            }
        })
    }
}
