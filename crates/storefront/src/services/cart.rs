//! Session-backed cart storage.
//!
//! The cart is serialized whole into the visitor's session, so it survives
//! page loads for the life of the session cookie.

use tower_sessions::Session;

use crate::models::{Cart, session_keys};

/// Loads and saves the visitor's [`Cart`].
#[derive(Clone, Copy)]
pub struct CartStore<'a> {
    session: &'a Session,
}

impl<'a> CartStore<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Current cart; empty if none has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(&self) -> Result<Cart, tower_sessions::session::Error> {
        Ok(self
            .session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Persist `cart`. An empty cart removes the session entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn save(&self, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
        if cart.is_empty() {
            return self.clear().await;
        }
        self.session.insert(session_keys::CART, cart).await
    }

    /// Load, apply `f`, then save.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut Cart) -> T,
    ) -> Result<(Cart, T), tower_sessions::session::Error> {
        let mut cart = self.load().await?;
        let output = f(&mut cart);
        self.save(&cart).await?;
        Ok((cart, output))
    }

    /// Drop the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn clear(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.remove::<Cart>(session_keys::CART).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::catalog::tests::{category, product};

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_load_defaults_to_empty() {
        let session = session();
        let store = CartStore::new(&session);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_persists() {
        let session = session();
        let store = CartStore::new(&session);
        let jamu = category(1, "jamu");
        let kunyit = product(1, "kunyit-asam", &jamu, 35_000);

        let (cart, ()) = store.update(|cart| cart.add_item(&kunyit, 2)).await.unwrap();
        assert_eq!(cart.total_items(), 2);
        assert_eq!(store.load().await.unwrap(), cart);

        let (_, removed) = store.update(|cart| cart.remove_item(kunyit.id)).await.unwrap();
        assert!(removed);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let session = session();
        let store = CartStore::new(&session);
        let jamu = category(1, "jamu");
        store
            .update(|cart| cart.add_item(&product(2, "beras-kencur", &jamu, 30_000), 1))
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
