//! Relative Strength Index (RSI).

use rust_decimal::Decimal;

use crate::core::{
    checked_add, checked_div, checked_mul, checked_sub, decimal_from_usize, Indicator,
    IndicatorError, IndicatorResult, Input,
};
use crate::util::resize;

/// Wilder's RSI oscillator scaled between 0 and 100.
///
/// The window holds `2 * length` points: the first `length` price changes
/// seed the average gain and loss, the remaining `length - 1` changes are
/// folded in with Wilder's smoothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsi {
    length: usize,
}

impl Rsi {
    /// Creates a new RSI with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let rsi = Self { length };
        rsi.validate()?;
        Ok(rsi)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }

    fn window(&self) -> Option<usize> {
        self.length.checked_mul(2)
    }

    // A window without losses saturates at 100, one without gains at 0.
    fn compute_rsi(avg_gain: Decimal, avg_loss: Decimal) -> IndicatorResult<Decimal> {
        if avg_loss.is_zero() {
            return Ok(Decimal::ONE_HUNDRED);
        }
        if avg_gain.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let rs = checked_div(avg_gain, avg_loss, "rsi")?;
        let denominator = checked_add(rs, Decimal::ONE, "rsi")?;
        Ok(Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / denominator)
    }

    fn smooth(&self, average: Decimal, latest: Decimal) -> IndicatorResult<Decimal> {
        let decay = decimal_from_usize(self.length - 1);
        let carried = checked_mul(average, decay, "rsi")?;
        Ok(checked_add(carried, latest, "rsi")? / decimal_from_usize(self.length))
    }
}

impl Indicator for Rsi {
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
        let divisor = decimal_from_usize(self.length);
        let (mut gain_sum, mut loss_sum) = (Decimal::ZERO, Decimal::ZERO);
        let mut avg: Option<(Decimal, Decimal)> = None;

        for (idx, pair) in window.windows(2).enumerate() {
            let change = checked_sub(pair[1].value(), pair[0].value(), "rsi")?;
            let gain = change.max(Decimal::ZERO);
            let loss = (-change).max(Decimal::ZERO);

            avg = match avg {
                Some((avg_gain, avg_loss)) => {
                    Some((self.smooth(avg_gain, gain)?, self.smooth(avg_loss, loss)?))
                }
                None => {
                    gain_sum = checked_add(gain_sum, gain, "rsi")?;
                    loss_sum = checked_add(loss_sum, loss, "rsi")?;
                    (idx + 1 == self.length).then(|| (gain_sum / divisor, loss_sum / divisor))
                }
            };
        }

        let (avg_gain, avg_loss) =
            avg.ok_or_else(|| IndicatorError::insufficient(self.count(), data.len()))?;
        Self::compute_rsi(avg_gain, avg_loss)
    }
}
