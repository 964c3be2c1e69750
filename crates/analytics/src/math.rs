//! Decimal helpers that never panic. Sums saturate at the `Decimal` bounds and
//! ratios that overflow are reported as zero, like the infinite ones.

use rust_decimal::Decimal;

/// `part / whole × 100`, or zero for an empty whole.
pub(crate) fn percent(part: usize, whole: usize) -> Decimal {
    percent_or_zero(Decimal::from(part), Decimal::from(whole))
}

/// `part / whole` as a fraction, or zero for an empty whole.
pub(crate) fn fraction(part: usize, whole: usize) -> Decimal {
    ratio_or_zero(Decimal::from(part), Decimal::from(whole))
}

/// Arithmetic mean of a sum over `count` items, or zero when there are none.
pub(crate) fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum.checked_div(Decimal::from(count)).unwrap_or(Decimal::ZERO)
}

/// `numerator / denominator`, reporting zero where the ratio would be infinite,
/// undefined or too large for a `Decimal`.
pub(crate) fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// [`ratio_or_zero`] scaled to a percentage, with the same zero fallback.
pub(crate) fn percent_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    ratio_or_zero(numerator, denominator)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Sum that saturates instead of overflowing.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}
