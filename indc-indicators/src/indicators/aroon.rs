//! Aroon up/down oscillator.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, Indicator, IndicatorError, IndicatorResult, Input};
use crate::tag::CiString;
use crate::util::resize;

/// Direction label reported by [`Aroon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trend {
    /// The highest high is more recent than the lowest low.
    Up,
    /// The lowest low is at least as recent as the highest high.
    Down,
}

impl Trend {
    /// Canonical lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&CiString> for Trend {
    type Error = IndicatorError;

    fn try_from(value: &CiString) -> Result<Self, Self::Error> {
        match value.as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(IndicatorError::InvalidType(format!(
                "aroon trend must be \"up\" or \"down\", got {other:?}"
            ))),
        }
    }
}

impl FromStr for Trend {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(&CiString::new(s))
    }
}

impl From<Trend> for CiString {
    fn from(value: Trend) -> Self {
        CiString::new(value.as_str())
    }
}

/// Both Aroon lines together with the dominant direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AroonOutput {
    /// `(length - periods since highest high) / length * 100`.
    pub up: Decimal,
    /// `(length - periods since lowest low) / length * 100`.
    pub down: Decimal,
    /// `Up` when the up line is strictly above the down line.
    pub trend: Trend,
}

/// Aroon indicator over a `length + 1` point window.
///
/// [`Indicator::calc`] yields the line selected by the configured trend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aroon {
    trend: Trend,
    length: usize,
}

impl Aroon {
    /// Creates an Aroon indicator reporting the `trend` line.
    pub fn new(trend: Trend, length: usize) -> IndicatorResult<Self> {
        let aroon = Self { trend, length };
        aroon.validate()?;
        Ok(aroon)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the line reported by [`Indicator::calc`].
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Computes both lines and the dominant trend.
    pub fn lines<I: Input>(&self, data: &[I]) -> IndicatorResult<AroonOutput> {
        let window = resize(data, self.count())?;
        // Ties resolve to the most recent extreme.
        let high_idx = latest_extreme(window, Input::high, |candidate, best| candidate >= best);
        let low_idx = latest_extreme(window, Input::low, |candidate, best| candidate <= best);

        let up = self.scale(high_idx);
        let down = self.scale(low_idx);
        let trend = if up > down { Trend::Up } else { Trend::Down };
        Ok(AroonOutput { up, down, trend })
    }

    // Index `idx` in a `length + 1` window is `length - idx` periods old.
    fn scale(&self, idx: usize) -> Decimal {
        decimal_from_usize(idx) / decimal_from_usize(self.length) * Decimal::ONE_HUNDRED
    }
}

fn latest_extreme<I, F, C>(window: &[I], field: F, better: C) -> usize
where
    I: Input,
    F: Fn(&I) -> Decimal,
    C: Fn(Decimal, Decimal) -> bool,
{
    let mut best_idx = 0;
    let mut best = field(&window[0]);
    for (idx, item) in window.iter().enumerate().skip(1) {
        let value = field(item);
        if better(value, best) {
            best = value;
            best_idx = idx;
        }
    }
    best_idx
}

impl Indicator for Aroon {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 || self.length == usize::MAX {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.length.saturating_add(1)
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let output = self.lines(data)?;
        Ok(match self.trend {
            Trend::Up => output.up,
            Trend::Down => output.down,
        })
    }
}
