//! User domain types.

use serde::{Deserialize, Serialize};

use naturindo_core::{Email, UserId};

/// A signed-in storefront user.
///
/// Populated only by the mock auth flow and kept in the session until
/// logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl User {
    /// Name shown in the navbar; falls back to the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.local_part()
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut user = User {
            id: UserId::new(1),
            name: "Sari Dewi".to_string(),
            email: Email::parse("sari@naturindo.id").unwrap(),
            phone: None,
            address: None,
        };
        assert_eq!(user.display_name(), "Sari Dewi");

        user.name = "  ".to_string();
        assert_eq!(user.display_name(), "sari");
    }
}
