#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Composable technical indicators built on decimal arithmetic.

/// Tagged record encoding and decoding.
pub mod codec;
/// Foundational traits and shared abstractions.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// The closed set of recognized indicator tags.
pub mod registry;
/// Case-insensitive tag strings.
pub mod tag;
/// Windowing and series helpers.
pub mod util;

/// Re-export of the codec entry points.
pub use crate::codec::{decode, encode};
/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{Indicator, IndicatorError, IndicatorResult, Input};
/// Re-export of the indicator sum type.
pub use crate::indicators::AnyIndicator;
/// Re-export of the tag registry.
pub use crate::registry::IndicatorKind;
/// Re-export of the normalized tag string.
pub use crate::tag::CiString;
