//! Flash notifications carried across a redirect.

use tower_sessions::Session;

use crate::models::{Flash, session_keys};

/// Queue `flash` for the next rendered page. Replaces any pending one.
///
/// Failures are logged rather than returned; losing a toast is not worth
/// failing the request that produced it.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(session_keys::FLASH, flash).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Take the pending flash, if any.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        set_flash(&session, Flash::success("Anda telah logout")).await;

        let flash = take_flash(&session).await.unwrap();
        assert_eq!(flash.message, "Anda telah logout");
        assert!(take_flash(&session).await.is_none());
    }
}
