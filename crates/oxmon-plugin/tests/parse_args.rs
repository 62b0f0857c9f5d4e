use clap::Parser;
use oxmon_plugin::io::{RecordingExit, SharedBuffer};
use oxmon_plugin::{ArgsError, CheckRun, Severity};

#[derive(Debug, Parser)]
#[command(name = "check_plugin")]
struct Opts {
    /// Hostname
    #[arg(short = 'H', long)]
    hostname: String,

    /// Port
    #[arg(short, long, default_value_t = 123)]
    port: u16,
}

fn harness() -> (CheckRun, SharedBuffer, RecordingExit) {
    let output = SharedBuffer::new();
    let exit = RecordingExit::new();
    let check = CheckRun::new("check_plugin", "v1.0", output.clone(), exit.clone());
    (check, output, exit)
}

#[test]
fn parses_plugin_options() {
    let (mut check, output, exit) = harness();
    let opts: Opts = check
        .parse_args(["check_plugin", "-H", "localhost", "--port", "8080"])
        .unwrap();
    assert_eq!(opts.hostname, "localhost");
    assert_eq!(opts.port, 8080);
    assert_eq!(output.contents(), "");
    assert_eq!(exit.severity(), None);
    assert!(!check.is_finished());
}

#[test]
fn defaults_apply() {
    let (mut check, _, _) = harness();
    let opts: Opts = check.parse_args(["check_plugin", "-H", "db01"]).unwrap();
    assert_eq!(opts.port, 123);
}

#[test]
fn missing_required_option_is_reported() {
    let (mut check, output, exit) = harness();
    let err = check.parse_args::<Opts, _, _>(["check_plugin"]).unwrap_err();
    assert!(matches!(err, ArgsError::Invalid(_)));
    assert_eq!(output.contents(), "");
    assert_eq!(exit.severity(), None);

    let reason = err.summary();
    assert!(reason.contains("--hostname"), "{reason}");
    assert!(!reason.contains('\n'));

    check.exit_critical(format!("Error parsing arguments: {reason}"));
    let out = output.contents();
    assert_eq!(out, format!("CRITICAL: Error parsing arguments: {reason}\n"));
    assert_eq!(exit.severity(), Some(Severity::Critical));
}

#[test]
fn help_prints_plugin_page_and_exits_unknown() {
    let (mut check, output, exit) = harness();
    let err = check
        .parse_args::<Opts, _, _>(["check_plugin", "-H", "localhost", "-h"])
        .unwrap_err();
    assert!(matches!(err, ArgsError::HelpDisplayed));
    assert_eq!(exit.severity(), Some(Severity::Unknown));
    assert!(check.is_finished());

    let out = output.contents();
    assert!(out.starts_with("check_plugin v1.0\nUsage:"), "{out}");
    assert!(out.contains("Plugin Options:"), "{out}");
    assert!(out.contains("--hostname"), "{out}");
    assert!(out.contains("Default Options:"), "{out}");
    assert!(out.contains("Show this help message"), "{out}");
    assert!(out.ends_with('\n'));
}

#[test]
fn help_wins_over_missing_required_option() {
    let (mut check, output, exit) = harness();
    let err = check.parse_args::<Opts, _, _>(["check_plugin", "--help"]).unwrap_err();
    assert!(matches!(err, ArgsError::HelpDisplayed));
    assert_eq!(exit.severity(), Some(Severity::Unknown));
    assert!(output.contents().starts_with("check_plugin v1.0\n"));
}

#[test]
fn help_wraps_usage_with_preamble_and_description() {
    let (mut check, output, _) = harness();
    check.set_preamble("Test output");
    check.set_description("Description:\n123");
    let _ = check.parse_args::<Opts, _, _>(["check_plugin", "-h"]);

    let out = output.contents();
    assert!(out.starts_with("check_plugin v1.0\nTest output\nUsage:"), "{out}");
    assert!(out.ends_with("\nDescription:\n123\n"), "{out}");
}

#[test]
fn finish_after_help_prints_nothing_more() {
    let (mut check, output, _) = harness();
    let _ = check.parse_args::<Opts, _, _>(["check_plugin", "-h"]);
    let help = output.contents();
    check.finish();
    assert_eq!(output.contents(), help);
}
