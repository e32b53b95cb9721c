//! URL-safe identifiers for products and categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,
    #[error("slug may only contain lowercase letters, digits and single hyphens: {0}")]
    InvalidFormat(String),
}

/// A URL-safe string identifier, distinct from an entity's primary ID.
///
/// Lowercase ASCII letters and digits, separated by single hyphens, with
/// no leading or trailing hyphen.
///
/// ```
/// use naturindo_core::Slug;
///
/// assert!(Slug::parse("madu-hutan-sumbawa").is_ok());
/// assert!(Slug::parse("Madu").is_err());
/// assert!(Slug::parse("madu--hutan").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Parse a slug.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the input is empty or not in canonical form.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        let well_formed = s
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        if !well_formed {
            return Err(SlugError::InvalidFormat(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Slug::parse("jamu").is_ok());
        assert!(Slug::parse("kapsul-kunyit-500mg").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        for bad in ["-jamu", "jamu-", "ja--mu", "Jamu", "jamu herbal", "jamu_herbal"] {
            assert!(
                matches!(Slug::parse(bad), Err(SlugError::InvalidFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Slug>("\"teh-herbal\"").is_ok());
        assert!(serde_json::from_str::<Slug>("\"Teh Herbal\"").is_err());
    }

    #[test]
    fn test_eq_str() {
        let slug = Slug::parse("madu").unwrap();
        assert!(slug == *"madu");
    }
}
