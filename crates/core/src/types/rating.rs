//! Product and testimonial star ratings.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// A star rating between 0.0 and 5.0 inclusive.
///
/// Out-of-range and NaN inputs are clamped so the value always has a total
/// order, which the catalog's rating sort relies on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    pub const MAX: f32 = 5.0;

    /// Stars drawn for a full rating.
    pub const MAX_STARS: u8 = 5;

    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, Self::MAX))
    }

    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Number of filled stars to draw (rounded).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
    pub fn stars(self) -> u8 {
        self.0.round() as u8
    }
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f32> for Rating {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps() {
        assert!((Rating::new(7.5).value() - 5.0).abs() < f32::EPSILON);
        assert!(Rating::new(-1.0).value().abs() < f32::EPSILON);
        assert!(Rating::new(f32::NAN).value().abs() < f32::EPSILON);
    }

    #[test]
    fn test_stars_and_display() {
        assert_eq!(Rating::new(4.8).stars(), 5);
        assert_eq!(Rating::new(4.2).stars(), 4);
        assert_eq!(Rating::new(4.75).to_string(), "4.8");
    }

    #[test]
    fn test_ordering() {
        let mut ratings = vec![Rating::new(4.5), Rating::new(4.9), Rating::new(3.0)];
        ratings.sort_by(|a, b| b.cmp(a));
        assert_eq!(ratings, vec![Rating::new(4.9), Rating::new(4.5), Rating::new(3.0)]);
    }
}
