use serde::{Deserialize, Serialize};
use std::fmt;

/// Check result severity, ordered by its exit code.
///
/// The ordering is purely numeric, so `Unknown` (exit code 3) wins every
/// worst-wins merge, including one against `Critical`.
///
/// # Examples
///
/// ```
/// use oxmon_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert_eq!(sev.to_string(), "WARNING");
/// assert_eq!(sev.exit_code(), 1);
/// assert!(Severity::Critical > Severity::Warning);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Warning,
        Severity::Critical,
        Severity::Unknown,
    ];

    /// Process exit code for this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Severity::Ok),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Critical),
            3 => Some(Severity::Unknown),
            _ => None,
        }
    }

    /// Worst-wins merge: the higher exit code is kept.
    ///
    /// ```
    /// use oxmon_common::types::Severity;
    ///
    /// assert_eq!(Severity::Ok.worst(Severity::Warning), Severity::Warning);
    /// assert_eq!(Severity::Unknown.worst(Severity::Critical), Severity::Unknown);
    /// ```
    pub fn worst(self, other: Severity) -> Severity {
        self.max(other)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Severity::Ok),
            "warning" | "warn" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            "unknown" => Ok(Severity::Unknown),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// A metric value as handed over by the plugin author.
///
/// The original form is kept for output, so `15789` stays `15789` and
/// `"1.00000001"` is echoed verbatim in the performance data.
///
/// # Examples
///
/// ```
/// use oxmon_common::types::MetricValue;
///
/// assert_eq!(MetricValue::from(123.456).as_f64(), Some(123.456));
/// assert_eq!(MetricValue::from("42").as_f64(), Some(42.0));
/// assert_eq!(MetricValue::from("abc").as_f64(), None);
/// assert_eq!(MetricValue::from(15789).to_string(), "15789");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    /// Single precision input, printed in its own shortest form.
    Float32(f32),
    Text(String),
}

impl MetricValue {
    /// Numeric view used for threshold evaluation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(v) => Some(*v as f64),
            MetricValue::Float(v) => Some(*v),
            MetricValue::Float32(v) => Some(f64::from(*v)),
            MetricValue::Text(s) => parse_finite(s),
        }
    }
}

/// Parses a decimal number, rejecting literals that overflow to infinity.
///
/// `inf`, `infinity` and `nan` spelled out are still accepted.
///
/// ```
/// use oxmon_common::types::parse_finite;
///
/// assert_eq!(parse_finite("1.5e3"), Some(1500.0));
/// assert_eq!(parse_finite("1e400"), None);
/// assert_eq!(parse_finite("-Inf"), Some(f64::NEG_INFINITY));
/// ```
pub fn parse_finite(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() {
        return Some(v);
    }
    let word = s.trim_start_matches(['+', '-']).to_ascii_lowercase();
    matches!(word.as_str(), "inf" | "infinity" | "nan").then_some(v)
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Float32(v) => write!(f, "{v}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Int(i64::from(v))
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        MetricValue::Int(i64::from(v))
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Float32(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}
