//! Type-safe price representation using decimal arithmetic.
//!
//! The product API and the persisted collections carry prices as plain JSON
//! numbers in US dollars. `Price` keeps them as exact decimals in memory so
//! cart totals don't accumulate binary floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in US dollars.
///
/// Serialized as a JSON number (`9.99`), matching the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The price of `quantity` units.
    ///
    /// Saturates at the largest representable amount instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or_else(|| Self::saturated(self.0.is_sign_negative()), Self)
    }

    /// Format for display with two decimals (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }

    const fn saturated(negative: bool) -> Self {
        if negative {
            Self(Decimal::MIN)
        } else {
            Self(Decimal::MAX)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${rounded:.2}")
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturating addition.
    fn add(self, rhs: Self) -> Self {
        self.0
            .checked_add(rhs.0)
            .map_or_else(|| Self::saturated(rhs.0.is_sign_negative()), Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
