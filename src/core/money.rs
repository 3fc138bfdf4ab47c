//! Exact-decimal money arithmetic.
//!
//! All monetary math in the engine goes through this module so the rounding
//! behavior stays in one place. Utilization is rounded half-up to four
//! fractional digits *before* scaling to a percentage; legacy reports depend
//! on that exact sequence, so it must not be reordered or widened.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal half-up at the given number of fractional digits.
///
/// Half-up here means midpoints round away from zero, matching how ledger
/// totals have historically been rounded (0.00005 at scale 4 becomes 0.0001).
#[must_use]
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes spent/allocated as a percentage.
///
/// The quotient is rounded half-up to four fractional digits and then
/// multiplied by 100, so the result carries four fractional digits of
/// utilization (e.g., 80.0000). A zero allocation yields zero utilization
/// rather than a division error.
#[must_use]
pub fn utilization_percent(allocated: Decimal, spent: Decimal) -> Decimal {
    if allocated.is_zero() {
        return Decimal::ZERO;
    }
    round_half_up(spent / allocated, 4) * Decimal::ONE_HUNDRED
}

/// Computes the percentage change from `previous` to `current`.
///
/// Returns zero when `previous` is not positive; no division is attempted in
/// that case.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current - previous) / previous * Decimal::ONE_HUNDRED
}
