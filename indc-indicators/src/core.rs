//! Core traits and error types shared by every indicator.

use indc_core::Candle;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias for indicator operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Errors surfaced while building, validating, computing, or decoding indicators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// A configured length parameter is less than 1.
    #[error("length cannot be less than 1")]
    InvalidLength,
    /// The supplied series is shorter than the indicator's requirement.
    #[error("insufficient amount of data points: required {required}, got {available}")]
    InsufficientDataPoints {
        /// Minimum number of points the computation needs.
        required: usize,
        /// Number of points that were supplied.
        available: usize,
    },
    /// A composite indicator record is missing its nested source.
    #[error("source indicator is not set")]
    SourceNotSet,
    /// The record's type tag does not name a known indicator.
    #[error("unrecognized source indicator name: {0:?}")]
    InvalidSourceName(String),
    /// A value had the wrong shape for the position it was used in.
    #[error("invalid indicator type: {0}")]
    InvalidType(String),
    /// A formula hit a zero denominator on degenerate input.
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),
    /// An intermediate value left the range of `Decimal`.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
    /// The structured record could not be read or written.
    #[error("malformed indicator record: {0}")]
    Serialization(String),
}

impl IndicatorError {
    /// Helper for constructing an insufficient data error.
    pub fn insufficient(required: usize, available: usize) -> Self {
        Self::InsufficientDataPoints {
            required,
            available,
        }
    }
}

impl From<serde_json::Error> for IndicatorError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}

/// Common behaviour implemented by every indicator variant.
///
/// Indicators are immutable values: validation and computation borrow them
/// and never change their configuration.
pub trait Indicator {
    /// Checks structural invariants, recursing into nested sources.
    fn validate(&self) -> IndicatorResult<()>;

    /// Minimum number of trailing points needed to produce one value.
    fn count(&self) -> usize;

    /// Computes the indicator over the trailing [`count`](Indicator::count)
    /// points of `data`.
    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal>;
}

/// Abstraction over the kinds of values an indicator can consume.
pub trait Input: Copy {
    /// Closing value of the observation.
    fn value(&self) -> Decimal;

    /// Highest value of the observation.
    fn high(&self) -> Decimal {
        self.value()
    }

    /// Lowest value of the observation.
    fn low(&self) -> Decimal {
        self.value()
    }
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

impl Input for Candle {
    fn value(&self) -> Decimal {
        self.close
    }

    fn high(&self) -> Decimal {
        self.high
    }

    fn low(&self) -> Decimal {
        self.low
    }
}

/// Converts a window size into a decimal divisor.
pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value)
}

/// Divides two decimals, reporting a zero denominator or an out-of-range
/// quotient against `indicator`.
pub(crate) fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    indicator: &'static str,
) -> IndicatorResult<Decimal> {
    if denominator.is_zero() {
        return Err(IndicatorError::DivisionByZero(indicator));
    }
    numerator
        .checked_div(denominator)
        .ok_or(IndicatorError::Overflow(indicator))
}

pub(crate) fn checked_add(
    lhs: Decimal,
    rhs: Decimal,
    indicator: &'static str,
) -> IndicatorResult<Decimal> {
    lhs.checked_add(rhs).ok_or(IndicatorError::Overflow(indicator))
}

pub(crate) fn checked_sub(
    lhs: Decimal,
    rhs: Decimal,
    indicator: &'static str,
) -> IndicatorResult<Decimal> {
    lhs.checked_sub(rhs).ok_or(IndicatorError::Overflow(indicator))
}

pub(crate) fn checked_mul(
    lhs: Decimal,
    rhs: Decimal,
    indicator: &'static str,
) -> IndicatorResult<Decimal> {
    lhs.checked_mul(rhs).ok_or(IndicatorError::Overflow(indicator))
}

/// Sums `values`, stopping at the first overflow.
pub(crate) fn checked_sum<T>(values: T, indicator: &'static str) -> IndicatorResult<Decimal>
where
    T: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| checked_add(acc, value, indicator))
}
