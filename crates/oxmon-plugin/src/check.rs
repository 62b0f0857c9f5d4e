use crate::config::PluginConfig;
use crate::error::MetricError;
use crate::io::{ExitHook, ProcessExit};
use crate::metric::MetricRegistry;
use crate::render::render;
use oxmon_common::types::{MetricValue, Severity};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

const DEFAULT_SEPARATOR: &str = ", ";

/// State of one plugin invocation, from start to the final status line.
///
/// Severity starts at OK and only ever gets worse through
/// [`update_status`](Self::update_status); the exit shortcuts are the one
/// way to force a specific severity.
pub struct CheckRun {
    name: String,
    version: String,
    preamble: Option<String>,
    description: Option<String>,
    message_separator: String,
    all_metrics_in_output: bool,
    status: Severity,
    messages: Vec<String>,
    metrics: MetricRegistry,
    output: Box<dyn Write + Send>,
    exit: Box<dyn ExitHook>,
    finished: bool,
}

impl CheckRun {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        output: impl Write + Send + 'static,
        exit: impl ExitHook + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            preamble: None,
            description: None,
            message_separator: DEFAULT_SEPARATOR.to_string(),
            all_metrics_in_output: false,
            status: Severity::Ok,
            messages: Vec::new(),
            metrics: MetricRegistry::new(),
            output: Box::new(output),
            exit: Box::new(exit),
            finished: false,
        }
    }

    /// A run writing to stdout and terminating the process on finish.
    pub fn stdio(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, std::io::stdout(), ProcessExit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current worst severity.
    pub fn status(&self) -> Severity {
        self.status
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn metrics(&self) -> &MetricRegistry {
        &self.metrics
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_message_separator(&mut self, separator: impl Into<String>) {
        self.message_separator = separator.into();
    }

    /// When enabled, every metric without a breach adds `<name> is <value>`
    /// to the messages.
    pub fn set_all_metrics_in_output(&mut self, enabled: bool) {
        self.all_metrics_in_output = enabled;
    }

    /// Text printed between the version line and the usage in `--help`.
    pub fn set_preamble(&mut self, preamble: impl Into<String>) {
        self.preamble = Some(preamble.into());
    }

    /// Text printed after the options in `--help`.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn apply_config(&mut self, config: &PluginConfig) {
        self.message_separator = config.message_separator.clone();
        self.all_metrics_in_output = config.all_metrics_in_output;
        if let Some(preamble) = &config.preamble {
            self.set_preamble(preamble.clone());
        }
        if let Some(description) = &config.description {
            self.set_description(description.clone());
        }
    }

    /// Adds a metric to the performance data.
    ///
    /// `args` are the optional unit of measurement, warning threshold and
    /// critical threshold, in that order. A breach adds an alert message and
    /// raises the run severity. Errors are reported to the caller only; the
    /// run carries on without the metric.
    ///
    /// ```
    /// # use oxmon_plugin::io::{RecordingExit, SharedBuffer};
    /// # use oxmon_plugin::{CheckRun, Severity};
    /// let mut check = CheckRun::new("check_ping", "1.0", SharedBuffer::new(), RecordingExit::new());
    /// check.add_metric("load5", 0.98, &[]).unwrap();
    /// check.add_metric("tmp", 15789, &["MB"]).unwrap();
    /// check.add_metric("rtmax", 28.723, &["", "75"]).unwrap();
    /// check.add_metric("rta", 124.558, &["ms", "50", "100"]).unwrap();
    /// assert_eq!(check.status(), Severity::Critical);
    /// assert!(check.add_metric("rta", 1, &[]).is_err());
    /// ```
    pub fn add_metric(
        &mut self,
        name: &str,
        value: impl Into<MetricValue>,
        args: &[&str],
    ) -> Result<(), MetricError> {
        let registration = match self.metrics.add(name, value, args) {
            Ok(registration) => registration,
            Err(e) => {
                tracing::debug!(metric = name, error = %e, "Metric rejected");
                return Err(e);
            }
        };

        if let Some(alert) = registration.alert {
            self.add_message(alert);
        } else if self.all_metrics_in_output {
            self.add_message(registration.summary);
        }

        self.update_status(registration.severity);
        Ok(())
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Replaces all accumulated messages with `message`.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.messages.clear();
        self.add_message(message);
    }

    /// Merges `severity` into the run and appends `message`.
    pub fn add_result(&mut self, severity: Severity, message: impl Into<String>) {
        self.update_status(severity);
        self.add_message(message);
    }

    /// Worst-wins: keeps whichever severity has the higher exit code.
    pub fn update_status(&mut self, severity: Severity) {
        self.status = self.status.worst(severity);
    }

    /// The status line for the current state. Does not consume anything.
    pub fn render(&self) -> String {
        render(
            self.status,
            &self.messages,
            &self.message_separator,
            &self.metrics,
        )
    }

    /// Writes the status line and hands the final severity to the exit hook.
    ///
    /// Only the first call has an effect.
    pub fn finish(&mut self) -> Severity {
        if self.finished {
            tracing::debug!(plugin = %self.name, "Check run already finished");
            return self.status;
        }
        self.finished = true;

        let line = self.render();
        if let Err(e) = self.write_output(&line) {
            tracing::warn!(plugin = %self.name, error = %e, "Failed to write check result");
        }
        tracing::debug!(
            plugin = %self.name,
            status = %self.status,
            metrics = self.metrics.len(),
            "Check run finished"
        );
        self.exit.exit(self.status);
        self.status
    }

    /// Finishes with exactly `severity` and `message`, discarding
    /// accumulated messages and metrics.
    ///
    /// On a finished run this changes nothing and returns the severity that
    /// was already emitted.
    pub fn exit(&mut self, severity: Severity, message: impl Into<String>) -> Severity {
        if self.finished {
            tracing::debug!(plugin = %self.name, requested = %severity, "Exit after finish ignored");
            return self.status;
        }
        self.status = severity;
        self.set_message(message);
        self.metrics.clear();
        self.finish()
    }

    pub fn exit_ok(&mut self, message: impl Into<String>) -> Severity {
        self.exit(Severity::Ok, message)
    }

    pub fn exit_warning(&mut self, message: impl Into<String>) -> Severity {
        self.exit(Severity::Warning, message)
    }

    pub fn exit_critical(&mut self, message: impl Into<String>) -> Severity {
        self.exit(Severity::Critical, message)
    }

    pub fn exit_unknown(&mut self, message: impl Into<String>) -> Severity {
        self.exit(Severity::Unknown, message)
    }

    /// Runs the check body and always finishes the run.
    ///
    /// A panic inside `body` becomes `CRITICAL: <name> panic: <detail>`, a
    /// returned error becomes `CRITICAL: <name> error: <error chain>`.
    pub fn run<F>(mut self, body: F) -> Severity
    where
        F: FnOnce(&mut CheckRun) -> anyhow::Result<()>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&mut self)));

        match outcome {
            Ok(Ok(())) => self.finish(),
            Ok(Err(e)) => {
                tracing::warn!(plugin = %self.name, error = %e, "Check body failed");
                let message = format!("{} error: {e:#}", self.name);
                self.exit_critical(message)
            }
            Err(payload) => {
                let detail = panic_detail(payload.as_ref());
                tracing::warn!(plugin = %self.name, panic = %detail, "Check body panicked");
                let message = format!("{} panic: {detail}", self.name);
                self.exit_critical(message)
            }
        }
    }

    pub(crate) fn write_output(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Ends the run without a status line, e.g. after printing help.
    pub(crate) fn terminate(&mut self, severity: Severity) {
        self.finished = true;
        self.exit.exit(severity);
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
