//! Command line options for check plugins, backed by clap.
//!
//! The plugin's own options are listed under `Plugin Options`; `-h/--help`
//! lives under `Default Options` and produces the plugin help page instead
//! of clap's, then ends the run with UNKNOWN.

use crate::check::CheckRun;
use crate::error::ArgsError;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use oxmon_common::types::Severity;
use std::ffi::OsString;

const HELP_ID: &str = "help";
pub const PLUGIN_HEADING: &str = "Plugin Options";
pub const DEFAULT_HEADING: &str = "Default Options";

/// The clap command for `T` with the plugin help layout applied.
pub fn plugin_command<T: CommandFactory>() -> Command {
    T::command()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .mut_args(|arg| {
            if arg.get_help_heading().is_none() {
                arg.help_heading(PLUGIN_HEADING)
            } else {
                arg
            }
        })
        .arg(
            Arg::new(HELP_ID)
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Show this help message")
                .help_heading(DEFAULT_HEADING),
        )
}

fn help_requested(command: &Command, args: &[OsString]) -> bool {
    command
        .clone()
        .ignore_errors(true)
        .try_get_matches_from(args)
        .ok()
        .and_then(|matches| flag(&matches, HELP_ID))
        .unwrap_or(false)
}

fn flag(matches: &ArgMatches, id: &str) -> Option<bool> {
    matches.try_get_one::<bool>(id).ok().flatten().copied()
}

impl CheckRun {
    /// Parses `args` (program name first) into the options struct `T`.
    ///
    /// When help is requested it wins over any other parse error: the help
    /// page is written, the exit hook is called with UNKNOWN and
    /// [`ArgsError::HelpDisplayed`] is returned.
    ///
    /// ```
    /// use clap::Parser;
    /// use oxmon_plugin::io::{RecordingExit, SharedBuffer};
    /// use oxmon_plugin::CheckRun;
    ///
    /// #[derive(Parser)]
    /// struct Opts {
    ///     #[arg(short = 'H', long)]
    ///     hostname: String,
    /// }
    ///
    /// let mut check = CheckRun::new("check_http", "1.0", SharedBuffer::new(), RecordingExit::new());
    /// let opts: Opts = check.parse_args(["check_http", "-H", "example.org"]).unwrap();
    /// assert_eq!(opts.hostname, "example.org");
    /// ```
    pub fn parse_args<T, I, S>(&mut self, args: I) -> Result<T, ArgsError>
    where
        T: Parser,
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut command = plugin_command::<T>();

        if help_requested(&command, &args) {
            self.print_help(&mut command)?;
            self.terminate(Severity::Unknown);
            return Err(ArgsError::HelpDisplayed);
        }

        let matches = command.try_get_matches_from_mut(&args)?;
        Ok(T::from_arg_matches(&matches)?)
    }

    /// [`parse_args`](Self::parse_args) over the process arguments.
    pub fn parse_env_args<T: Parser>(&mut self) -> Result<T, ArgsError> {
        self.parse_args(std::env::args_os())
    }

    /// The help page: version line, preamble, usage and options,
    /// description.
    pub fn help_text(&self, command: &mut Command) -> String {
        let version = self.version().strip_prefix('v').unwrap_or(self.version());
        let mut text = format!("{} v{}\n", self.name(), version);

        if let Some(preamble) = self.preamble().filter(|p| !p.is_empty()) {
            text.push_str(preamble);
            text.push('\n');
        }

        text.push_str(&command.render_help().to_string());
        text.push('\n');

        if let Some(description) = self.description().filter(|d| !d.is_empty()) {
            text.push_str(description);
            text.push('\n');
        }
        text
    }

    fn print_help(&mut self, command: &mut Command) -> std::io::Result<()> {
        let text = self.help_text(command);
        self.write_output(&text)
    }
}
