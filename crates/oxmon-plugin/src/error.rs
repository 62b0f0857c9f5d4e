use crate::metric::ThresholdKind;
use oxmon_alert::RangeError;

/// Why a metric was rejected by the registry.
///
/// A rejected metric leaves the run untouched: no message, no severity
/// change. The display strings are part of the plugin contract and are often
/// echoed verbatim by callers.
///
/// # Examples
///
/// ```rust
/// use oxmon_plugin::MetricError;
///
/// let err = MetricError::Duplicated("load1".to_string());
/// assert_eq!(err.to_string(), "Duplicated metric load1");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("Duplicated metric {0}")]
    Duplicated(String),

    /// The value is text that does not parse as a number.
    #[error("Invalid value of {name}: {value}")]
    InvalidValue { name: String, value: String },

    /// More than the three optional arguments (uom, warning, critical).
    #[error("Too many arguments")]
    TooManyArguments,

    #[error("Invalid format of {kind} threshold {name}: {spec}")]
    InvalidThreshold {
        kind: ThresholdKind,
        name: String,
        spec: String,
        #[source]
        source: RangeError,
    },
}

/// Outcome of [`CheckRun::parse_args`](crate::CheckRun::parse_args) other than
/// parsed options.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    /// `-h/--help` was given; the help text has been written and the exit
    /// hook called with UNKNOWN.
    #[error("help requested")]
    HelpDisplayed,

    #[error("{0}")]
    Invalid(#[from] clap::Error),

    #[error("failed to write help output: {0}")]
    Output(#[from] std::io::Error),
}

impl ArgsError {
    /// One-line reason, suitable for a status line. Clap's usage block and
    /// hints are dropped.
    pub fn summary(&self) -> String {
        let text = self.to_string();
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty())
            .collect();
        lines
            .join(" ")
            .trim_start_matches("error: ")
            .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config: cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Config: invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MetricError>;
