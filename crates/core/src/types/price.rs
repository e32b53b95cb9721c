//! Rupiah price representation using decimal arithmetic.
//!
//! Every price in the catalog is denominated in Indonesian rupiah (IDR),
//! which has no minor unit in everyday use. Arithmetic stays in
//! [`Decimal`] so cart totals never drift the way floats would.

use core::fmt;
use core::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// A non-negative amount of Indonesian rupiah.
///
/// Displays the way `id-ID` currency formatting does, without fraction
/// digits: `Rp 120.000`.
///
/// ```
/// use naturindo_core::Price;
///
/// let price = Price::from_rupiah(120_000);
/// assert_eq!(price.to_string(), "Rp 120.000");
/// assert_eq!(price.times(3), Price::from_rupiah(360_000));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero rupiah.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// Returns `None` for negative amounts.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return None;
        }
        Some(Self(amount))
    }

    /// Create a price from a whole number of rupiah.
    #[must_use]
    pub fn from_rupiah(rupiah: u64) -> Self {
        Self(Decimal::from(rupiah))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Percentage saved relative to `original`, rounded to the nearest
    /// whole percent.
    ///
    /// `None` when `original` is not above this price (nothing to advertise).
    #[must_use]
    pub fn discount_percent(self, original: Self) -> Option<u32> {
        if original <= self || original.0.is_zero() {
            return None;
        }
        let percent = (original.0 - self.0) / original.0 * Decimal::ONE_HUNDRED;
        percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .trunc()
            .to_string();

        // Group thousands with '.', as id-ID does
        let digits = whole.len();
        let mut grouped = String::with_capacity(digits + digits / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "Rp {grouped}")
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
