//! Exponential Moving Average (EMA).

use rust_decimal::Decimal;

use crate::core::{
    checked_add, checked_mul, checked_sub, checked_sum, decimal_from_usize, Indicator,
    IndicatorError, IndicatorResult, Input,
};
use crate::util::resize;

/// Exponentially-weighted mean with smoothing factor `2 / (length + 1)`.
///
/// The average is seeded with the SMA of the first `length` points of the
/// window and then smoothed over the remaining `length - 1` points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ema {
    length: usize,
}

impl Ema {
    /// Creates a new EMA with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let ema = Self { length };
        ema.validate()?;
        Ok(ema)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }

    fn window(&self) -> Option<usize> {
        self.length.checked_mul(2)?.checked_sub(1)
    }

    fn alpha(&self) -> Decimal {
        Decimal::from(2) / decimal_from_usize(self.length + 1)
    }
}

impl Indicator for Ema {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 || self.window().is_none() {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.window().unwrap_or(usize::MAX)
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let (seed, rest) = window.split_at(self.length);
        let alpha = self.alpha();

        let seed_sum = checked_sum(seed.iter().map(Input::value), "ema")?;
        let mut average = seed_sum / decimal_from_usize(self.length);
        for item in rest {
            let delta = checked_sub(item.value(), average, "ema")?;
            average = checked_add(checked_mul(delta, alpha, "ema")?, average, "ema")?;
        }
        Ok(average)
    }
}
