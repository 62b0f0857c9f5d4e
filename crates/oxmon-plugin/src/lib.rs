//! Toolkit for writing Nagios/Icinga style check plugins.
//!
//! A [`CheckRun`] collects messages, result severities and metrics for one
//! plugin invocation, then prints a single status line and exits with the
//! matching code:
//!
//! ```text
//! WARNING: rta is 120ms (outside 100) | rta=120ms;100;200;;
//! ```
//!
//! Output and process exit are injected through [`io::ExitHook`] and any
//! [`std::io::Write`] sink, so a run can be driven entirely in memory.
//!
//! ```
//! use oxmon_plugin::io::{RecordingExit, SharedBuffer};
//! use oxmon_plugin::{CheckRun, Severity};
//!
//! let out = SharedBuffer::new();
//! let exit = RecordingExit::new();
//! let check = CheckRun::new("check_disk", "1.0.0", out.clone(), exit.clone());
//!
//! check.run(|check| {
//!     check.add_message("Disk /data");
//!     check.add_metric("used", 91, &["%", "80", "95"])?;
//!     Ok(())
//! });
//!
//! assert_eq!(out.contents(), "WARNING: Disk /data, used is 91% (outside 80) | used=91%;80;95;;\n");
//! assert_eq!(exit.severity(), Some(Severity::Warning));
//! ```

pub mod args;
pub mod check;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod metric;
pub mod render;


pub use check::CheckRun;
pub use config::PluginConfig;
pub use error::{ArgsError, ConfigError, MetricError};
pub use metric::{Metric, MetricRegistry, ThresholdKind};
pub use oxmon_common::types::{MetricValue, Severity};
