//! Windowing and series helpers shared by the indicator formulas.

use rust_decimal::Decimal;

use crate::core::{
    checked_add, checked_sub, checked_sum, decimal_from_usize, IndicatorError, IndicatorResult,
    Input,
};

/// Returns the trailing `length` elements of `data`, oldest first.
///
/// Works for plain values and candles alike. Every indicator runs its input
/// through this before reading any numbers.
pub fn resize<T>(data: &[T], length: usize) -> IndicatorResult<&[T]> {
    if length < 1 {
        return Err(IndicatorError::InvalidLength);
    }
    if length > data.len() {
        return Err(IndicatorError::insufficient(length, data.len()));
    }
    Ok(&data[data.len() - length..])
}

/// Maps every observation to `(high + low + close) / 3`.
pub fn typical_price<I: Input>(data: &[I]) -> IndicatorResult<Vec<Decimal>> {
    let three = Decimal::from(3);
    data.iter()
        .map(|item| {
            let total = checked_sum([item.high(), item.low(), item.value()], "typical price")?;
            Ok(total / three)
        })
        .collect()
}

/// Mean absolute deviation from the arithmetic mean, rounded to 8 places.
pub fn mean_deviation(values: &[Decimal]) -> IndicatorResult<Decimal> {
    if values.is_empty() {
        return Err(IndicatorError::insufficient(1, 0));
    }
    let divisor = decimal_from_usize(values.len());
    let mean = checked_sum(values.iter().copied(), "mean deviation")? / divisor;
    let total = values.iter().try_fold(Decimal::ZERO, |acc, value| {
        let delta = checked_sub(*value, mean, "mean deviation")?.abs();
        checked_add(acc, delta, "mean deviation")
    })?;
    Ok((total / divisor).round_dp(8))
}

/// Evaluates `f` over the `points` trailing prefixes of `data`.
///
/// The k-th output is computed on `data` truncated so that it ends
/// `points - 1 - k` observations before the last one, which yields a series of
/// `points` chronologically ordered values.
pub(crate) fn trailing_series<T, F>(data: &[T], points: usize, mut f: F) -> IndicatorResult<Vec<Decimal>>
where
    F: FnMut(&[T]) -> IndicatorResult<Decimal>,
{
    if points > data.len() {
        return Err(IndicatorError::insufficient(points, data.len()));
    }
    let first_end = data.len() + 1 - points;
    (first_end..=data.len()).map(|end| f(&data[..end])).collect()
}

/// Largest integer whose square does not exceed `value`.
pub(crate) fn integer_sqrt(value: usize) -> usize {
    if value < 2 {
        return value;
    }
    // Newton iteration from above; stops once the estimate stops shrinking.
    let mut root = value / 2 + 1;
    let mut next = (root + value / root) / 2;
    while next < root {
        root = next;
        next = (root + value / root) / 2;
    }
    root
}
