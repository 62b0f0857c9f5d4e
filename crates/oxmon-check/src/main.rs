use anyhow::{Context, Result};
use clap::Parser;
use oxmon_collector::{Collector, Sample};
use oxmon_plugin::{logging, ArgsError, CheckRun, PluginConfig};
use std::path::PathBuf;

/// Options of the host resource check.
#[derive(Debug, Parser)]
#[command(name = "oxmon-check")]
struct Opts {
    /// Collector to run: load or memory
    #[arg(short = 'C', long)]
    collector: String,

    /// Warning threshold applied to every reported metric
    #[arg(short, long, default_value = "")]
    warning: String,

    /// Critical threshold applied to every reported metric
    #[arg(short, long, default_value = "")]
    critical: String,

    /// Only report the named metric (repeatable)
    #[arg(short, long)]
    metric: Vec<String>,

    /// Plugin output settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();

    let mut check = CheckRun::stdio("oxmon-check", env!("CARGO_PKG_VERSION"));
    check.set_preamble("Checks local host resources against monitoring plugin thresholds.");
    check.set_description(format!(
        "Collectors: {}\nThresholds use the range syntax: 10, 10:, ~:10, 10:20, @10:20",
        oxmon_collector::NAMES.join(", ")
    ));

    let opts: Opts = match check.parse_env_args() {
        Ok(opts) => opts,
        Err(ArgsError::HelpDisplayed) => return,
        Err(e) => {
            check.exit_critical(format!("Error parsing arguments: {}", e.summary()));
            return;
        }
    };

    if let Some(path) = &opts.config {
        match PluginConfig::load(path) {
            Ok(config) => check.apply_config(&config),
            Err(e) => {
                check.exit_unknown(e.to_string());
                return;
            }
        }
    }

    check.run(|check| run_collector(check, &opts));
}

fn run_collector(check: &mut CheckRun, opts: &Opts) -> Result<()> {
    let Some(mut collector) = oxmon_collector::by_name(&opts.collector) else {
        check.exit_unknown(format!(
            "Unknown collector {} (expected one of: {})",
            opts.collector,
            oxmon_collector::NAMES.join(", ")
        ));
        return Ok(());
    };

    let samples = collector
        .collect()
        .with_context(|| format!("{} collector failed", collector.name()))?;
    tracing::debug!(collector = collector.name(), count = samples.len(), "Collected samples");

    report_samples(check, collector.as_ref(), &samples, opts);
    Ok(())
}

fn report_samples(check: &mut CheckRun, collector: &dyn Collector, samples: &[Sample], opts: &Opts) {
    let selected: Vec<&Sample> = samples
        .iter()
        .filter(|s| opts.metric.is_empty() || opts.metric.contains(&s.name))
        .collect();

    if selected.is_empty() {
        check.exit_unknown(format!(
            "No matching metrics from {} collector",
            collector.name()
        ));
        return;
    }

    check.add_message(format!("{}: {} metrics", collector.name(), selected.len()));

    for sample in selected {
        let args = [sample.uom, opts.warning.as_str(), opts.critical.as_str()];
        if let Err(e) = check.add_metric(&sample.name, round2(sample.value), &args) {
            check.exit_unknown(e.to_string());
            return;
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
