//! Threshold ranges for check metrics.
//!
//! A threshold spec is the compact range syntax of the monitoring plugin
//! guidelines: `10`, `10:`, `~:10`, `10:20`, each optionally prefixed with
//! `@` to alert inside the range instead of outside it. [`ThresholdRange`]
//! is the parsed form and [`evaluate`] is the one-shot helper used by the
//! metric registry.

pub mod error;
pub mod threshold;

#[cfg(test)]
mod tests;

pub use error::RangeError;
pub use threshold::{evaluate, Bounds, ThresholdRange};
