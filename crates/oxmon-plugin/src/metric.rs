use crate::error::{MetricError, Result};
use oxmon_alert::ThresholdRange;
use oxmon_common::types::{MetricValue, Severity};
use std::collections::BTreeMap;
use std::fmt;

/// Which of the two threshold slots a spec was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    Warning,
    Critical,
}

impl ThresholdKind {
    /// Evaluation order; a critical breach overrides a warning one.
    pub const ALL: [ThresholdKind; 2] = [ThresholdKind::Warning, ThresholdKind::Critical];

    /// Severity a breach of this threshold raises the metric to.
    pub fn severity(self) -> Severity {
        match self {
            ThresholdKind::Warning => Severity::Warning,
            ThresholdKind::Critical => Severity::Critical,
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdKind::Warning => write!(f, "warning"),
            ThresholdKind::Critical => write!(f, "critical"),
        }
    }
}

/// A registered metric. Its `Display` form is the performance data entry:
/// `name=value<uom>;warn;crit;;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    value: MetricValue,
    uom: String,
    warning: String,
    critical: String,
    severity: Severity,
}

impl Metric {
    /// Display name, quoted if the original name contained a space.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    pub fn uom(&self) -> &str {
        &self.uom
    }

    /// Raw warning spec, empty when none was evaluated.
    pub fn warning(&self) -> &str {
        &self.warning
    }

    pub fn critical(&self) -> &str {
        &self.critical
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// `<name> is <value><uom>`, the informational text of all-metrics mode.
    pub fn summary(&self) -> String {
        format!("{} is {}{}", self.name, self.value, self.uom)
    }

    fn set_spec(&mut self, kind: ThresholdKind, spec: &str) {
        match kind {
            ThresholdKind::Warning => self.warning = spec.to_string(),
            ThresholdKind::Critical => self.critical = spec.to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}{};{};{};;",
            self.name, self.value, self.uom, self.warning, self.critical
        )
    }
}

/// What registering a metric means for the run it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub severity: Severity,
    /// Alert text of the last breached threshold, if any.
    pub alert: Option<String>,
    pub summary: String,
}

/// Metrics of one check run, keyed and ordered by display name.
#[derive(Debug, Default, Clone)]
pub struct MetricRegistry {
    metrics: BTreeMap<String, Metric>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates, evaluates and stores a metric.
    ///
    /// `args` are positional: unit of measurement, warning spec, critical
    /// spec. Any error leaves the registry unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxmon_plugin::{MetricRegistry, Severity};
    ///
    /// let mut registry = MetricRegistry::new();
    /// let reg = registry.add("rta", 24.558, &["ms", "50", "100"]).unwrap();
    /// assert_eq!(reg.severity, Severity::Ok);
    ///
    /// let reg = registry.add("pl", 60, &["%", "20", "@50:70"]).unwrap();
    /// assert_eq!(reg.severity, Severity::Critical);
    /// assert_eq!(reg.alert.as_deref(), Some("pl is 60% (inside @50:70)"));
    /// ```
    pub fn add(
        &mut self,
        name: &str,
        value: impl Into<MetricValue>,
        args: &[&str],
    ) -> Result<Registration> {
        let name = display_name(name);
        if self.metrics.contains_key(&name) {
            return Err(MetricError::Duplicated(name));
        }

        let value = value.into();
        let Some(numeric) = value.as_f64() else {
            return Err(MetricError::InvalidValue {
                name,
                value: value.to_string(),
            });
        };

        if args.len() > 3 {
            return Err(MetricError::TooManyArguments);
        }

        let mut metric = Metric {
            name: name.clone(),
            value,
            uom: args.first().map(|u| u.to_string()).unwrap_or_default(),
            warning: String::new(),
            critical: String::new(),
            severity: Severity::Ok,
        };

        let mut alert = None;
        for (kind, spec) in ThresholdKind::ALL.into_iter().zip(args.iter().skip(1)) {
            if spec.is_empty() {
                continue;
            }
            let range: ThresholdRange = spec.parse().map_err(|source| {
                MetricError::InvalidThreshold {
                    kind,
                    name: name.clone(),
                    spec: spec.to_string(),
                    source,
                }
            })?;
            metric.set_spec(kind, spec);

            if range.is_breached(numeric) {
                metric.severity = kind.severity();
                let side = if range.inverted() { "inside" } else { "outside" };
                alert = Some(format!("{} ({side} {spec})", metric.summary()));
            }
        }

        let registration = Registration {
            severity: metric.severity,
            alert,
            summary: metric.summary(),
        };
        self.metrics.insert(name, metric);
        Ok(registration)
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// Metrics in ascending byte-wise order of their display names.
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn clear(&mut self) {
        self.metrics.clear();
    }
}

/// Names with a space are single-quoted for the performance data, unless
/// the caller already quoted them.
pub fn display_name(name: &str) -> String {
    if name.contains(' ') && !name.starts_with('\'') {
        format!("'{name}'")
    } else {
        name.to_string()
    }
}
