//! Decimal amounts and debit/credit balances
//!
//! Amounts are plain `rust_decimal::Decimal` values in the company currency.
//! This module fixes the quantization rules used across the system and
//! provides [`Balance`], a debit/credit pair that can be summed, netted
//! and mirrored.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Canonical zero used for sign comparisons
pub const ZERO: Decimal = Decimal::ZERO;

/// Decimal places kept on invoiced (posted) amounts
pub const INVOICED_SCALE: u32 = 2;

/// Decimal places kept on derived pending merited amounts
pub const MERITED_SCALE: u32 = 3;

/// Quantizes an amount to `scale` decimal places
///
/// Rounds half away from zero and pads the result so it always carries exactly
/// `scale` decimal places (`1000` becomes `1000.00` at scale 2).
///
/// # Example
///
/// ```rust
/// use core_kernel::quantize;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(quantize(dec!(25.8325), 3), dec!(25.833));
/// assert_eq!(quantize(dec!(1000), 2).to_string(), "1000.00");
/// ```
pub fn quantize(amount: Decimal, scale: u32) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// A debit/credit pair
///
/// Used both for a single ledger line (where at most one side is non-zero)
/// and for totals over many lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Debit side
    pub debit: Decimal,
    /// Credit side
    pub credit: Decimal,
}

impl Balance {
    /// Creates a balance from both sides
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// A balance with nothing on either side
    pub fn zero() -> Self {
        Self::new(ZERO, ZERO)
    }

    /// A pure debit of `amount`
    pub fn debit(amount: Decimal) -> Self {
        Self::new(amount, ZERO)
    }

    /// A pure credit of `amount`
    pub fn credit(amount: Decimal) -> Self {
        Self::new(ZERO, amount)
    }

    /// Returns true if both sides are zero
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Returns true if debits equal credits
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Net amount seen from the credit side (`credit - debit`)
    pub fn net_credit(&self) -> Decimal {
        self.credit - self.debit
    }

    /// Absolute difference between the two sides
    pub fn abs_net(&self) -> Decimal {
        self.net_credit().abs()
    }

    /// Swaps debit and credit
    pub fn mirrored(&self) -> Self {
        Self::new(self.credit, self.debit)
    }
}

impl Add for Balance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.debit + other.debit, self.credit + other.credit)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, other: Self) {
        self.debit += other.debit;
        self.credit += other.credit;
    }
}

impl Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Balance::zero(), |acc, b| acc + b)
    }
}

impl<'a> Sum<&'a Balance> for Balance {
    fn sum<I: Iterator<Item = &'a Balance>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dr {} / Cr {}", self.debit, self.credit)
    }
}
