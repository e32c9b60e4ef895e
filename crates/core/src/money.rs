//! Monetary amounts.
//!
//! Amounts are exact decimals. The only lossy step is [`Price::from_f32`],
//! used where a boundary insists on binary floats. Arithmetic is checked:
//! a result beyond the decimal range is a [`DomainError::Validation`].

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Immutable decimal price.
///
/// Equality is by value and ignores scale: `8.0` and `8.00` are the same price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Build a price from a binary float.
    ///
    /// Precision loss inherent to `f32` is carried over into the decimal.
    pub fn from_f32(amount: f32) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation(format!("price {amount} is not a finite number")));
        }
        Decimal::from_f32(amount)
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("price {amount} is out of range")))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Exact sum of two prices.
    pub fn add(a: Price, b: Price) -> DomainResult<Price> {
        a.0.checked_add(b.0)
            .map(Price)
            .ok_or_else(|| DomainError::validation(format!("price sum {a} + {b} is out of range")))
    }

    /// Exact product of a unit price and a quantity.
    pub fn times(&self, quantity: u32) -> DomainResult<Price> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Price)
            .ok_or_else(|| {
                DomainError::validation(format!("price {self} times {quantity} is out of range"))
            })
    }

    /// Exact sum of any number of prices; zero when there are none.
    pub fn checked_sum<I>(prices: I) -> DomainResult<Price>
    where
        I: IntoIterator<Item = Price>,
    {
        prices.into_iter().try_fold(Price::zero(), Price::add)
    }

    pub fn same_as(&self, other: &Price) -> bool {
        self.0 == other.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
