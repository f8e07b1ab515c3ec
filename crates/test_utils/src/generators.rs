//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating prices and quantities the way
//! certifications carry them.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Balance;

/// Unit prices from 0.001 to 100000.000, three decimals
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 3))
}

/// Certified quantities from 0.001 to 10000.000, three decimals
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 3))
}

/// Posted amounts in cents, up to ten million
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Debit/credit totals as a set of pending lines would carry them
pub fn balance_strategy() -> impl Strategy<Value = Balance> {
    (amount_strategy(), amount_strategy()).prop_map(|(debit, credit)| Balance::new(debit, credit))
}
