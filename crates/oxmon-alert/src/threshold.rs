use crate::error::{RangeError, Result};
use oxmon_common::types::parse_finite;
use std::fmt;
use std::str::FromStr;

/// The numeric part of a threshold spec, before inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// `X`: shorthand for `0:X`.
    Upper(f64),
    /// `X:`: anything below `X` alerts.
    AtLeast(f64),
    /// `~:X`: anything above `X` alerts.
    AtMost(f64),
    /// `X:Y` with `X <= Y`.
    Between(f64, f64),
}

impl Bounds {
    fn is_outside(&self, value: f64) -> bool {
        match *self {
            Bounds::Upper(max) => value < 0.0 || value > max,
            Bounds::AtLeast(min) => value < min,
            Bounds::AtMost(max) => value > max,
            Bounds::Between(min, max) => value < min || value > max,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bounds::Upper(max) => write!(f, "{max}"),
            Bounds::AtLeast(min) => write!(f, "{min}:"),
            Bounds::AtMost(max) => write!(f, "~:{max}"),
            Bounds::Between(min, max) => write!(f, "{min}:{max}"),
        }
    }
}

/// A parsed threshold spec.
///
/// Bounds are inclusive: a value equal to a bound never breaches.
///
/// # Examples
///
/// ```
/// use oxmon_alert::ThresholdRange;
///
/// let range: ThresholdRange = "10:20".parse().unwrap();
/// assert!(range.is_breached(25.0));
/// assert!(!range.is_breached(20.0));
///
/// let inside: ThresholdRange = "@10:20".parse().unwrap();
/// assert!(inside.is_breached(15.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRange {
    bounds: Bounds,
    inverted: bool,
}

impl ThresholdRange {
    pub fn new(bounds: Bounds, inverted: bool) -> Self {
        Self { bounds, inverted }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// True for `@` specs, which alert when the value is inside the range.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_breached(&self, value: f64) -> bool {
        self.bounds.is_outside(value) != self.inverted
    }
}

impl FromStr for ThresholdRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(RangeError::Empty);
        }

        let (inverted, range) = match s.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let parts: Vec<&str> = range.split(':').collect();
        let bounds = match parts.as_slice() {
            [max] => Bounds::Upper(parse_bound(max)?),
            ["~", max] => Bounds::AtMost(parse_bound(max)?),
            [min, ""] => Bounds::AtLeast(parse_bound(min)?),
            [min, max] => {
                let low = parse_bound(min)?;
                let high = parse_bound(max)?;
                if low > high {
                    return Err(RangeError::ReversedBounds { low, high });
                }
                Bounds::Between(low, high)
            }
            _ => return Err(RangeError::TooManyParts(s.to_string())),
        };

        Ok(Self { bounds, inverted })
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }
        write!(f, "{}", self.bounds)
    }
}

fn parse_bound(token: &str) -> Result<f64> {
    parse_finite(token).ok_or_else(|| RangeError::InvalidBound(token.to_string()))
}

/// Tests `value` against a raw threshold spec.
///
/// An empty spec means "no threshold" and never breaches.
///
/// ```
/// use oxmon_alert::evaluate;
///
/// assert_eq!(evaluate(123.456, "100"), Ok(true));
/// assert_eq!(evaluate(123.456, ""), Ok(false));
/// assert!(evaluate(123.456, "20:100:200").is_err());
/// ```
pub fn evaluate(value: f64, spec: &str) -> Result<bool> {
    if spec.is_empty() {
        return Ok(false);
    }
    let range: ThresholdRange = spec.parse()?;
    Ok(range.is_breached(value))
}
