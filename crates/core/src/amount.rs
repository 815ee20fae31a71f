//! Amount - Decimal wrapper for claimed amounts
//!
//! Claims may be negative (refunds, corrections). The policy rules decide
//! what a negative claim means; this type does not reject it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A claimed amount in the policy currency.
///
/// # Example
/// ```
/// use expense_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(7500, 0));
/// assert_eq!(amount.value(), Decimal::new(7500, 0));
///
/// // Refunds are carried as-is
/// assert!(Amount::new(Decimal::new(-50, 0)).is_refund());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True for claims below zero
    pub fn is_refund(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Lossy conversion for numeric model features
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(if self.is_refund() { f64::MIN } else { f64::MAX })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}
