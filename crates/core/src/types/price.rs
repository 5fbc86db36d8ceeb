//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept as [`Decimal`] so cart totals never pick up binary
//! floating-point noise (`0.1 + 0.2` stays `0.3`).

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A non-negative amount in the storefront's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping negative amounts to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self(amount)
        }
    }

    /// Create a price from whole units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` items at this unit price, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format as a plain number: no trailing zeros, no forced decimals.
    ///
    /// `50` → `"50"`, `12.50` → `"12.5"`.
    #[must_use]
    pub fn display_plain(&self) -> String {
        self.0.normalize().to_string()
    }

    /// Format as a total: two fixed decimals with a literal `.00` suffix removed.
    ///
    /// `45` → `"45"`, `45.5` → `"45.50"`, `45.10` → `"45.10"`.
    #[must_use]
    pub fn display_total(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let fixed = format!("{rounded:.2}");
        match fixed.strip_suffix(".00") {
            Some(whole) => whole.to_string(),
            None => fixed,
        }
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`]; catalog prices are unbounded.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}
