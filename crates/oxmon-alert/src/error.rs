/// Reasons a threshold spec cannot be parsed.
///
/// # Examples
///
/// ```rust
/// use oxmon_alert::RangeError;
///
/// let err: RangeError = "2000:100".parse::<oxmon_alert::ThresholdRange>().unwrap_err();
/// assert!(matches!(err, RangeError::ReversedBounds { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("Threshold: empty range")]
    Empty,

    /// More than one `:` separator.
    #[error("Threshold: too many ':' separators in '{0}'")]
    TooManyParts(String),

    /// A bound that is not a number.
    #[error("Threshold: invalid bound '{0}'")]
    InvalidBound(String),

    /// `low:high` with `low > high`.
    #[error("Threshold: lower bound {low} is greater than upper bound {high}")]
    ReversedBounds { low: f64, high: f64 },
}

pub type Result<T> = std::result::Result<T, RangeError>;
