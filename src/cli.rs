//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Which report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Power/energy estimation from the monitoring exports.
    Power,
    /// Monthly consumption/generation scaling.
    Scale,
}

#[derive(Debug)]
pub struct CliOptions {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub export_limit_report: Option<PathBuf>,
    pub actuals: Option<PathBuf>,
    pub series_out: Option<PathBuf>,
    pub chart_out: Option<PathBuf>,
    pub no_chart: bool,
}

/// Outcome of parsing: either options to run with or a help request.
#[derive(Debug)]
pub enum Parsed {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<Parsed, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<Parsed, String> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Parsed::Help);
    }

    let command = match args.first().map(String::as_str) {
        Some("power") => Command::Power,
        Some("scale") => Command::Scale,
        Some(other) => {
            return Err(format!(
                "unknown command: {other} (expected `power` or `scale`)"
            ));
        }
        None => return Err("missing command (expected `power` or `scale`)".to_string()),
    };

    let mut opts = CliOptions {
        command,
        config: None,
        report: None,
        export_limit_report: None,
        actuals: None,
        series_out: None,
        chart_out: None,
        no_chart: false,
    };

    let mut i = 1usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let slot = match flag {
            "--config" => &mut opts.config,
            "--report" if command == Command::Power => &mut opts.report,
            "--export-limit-report" if command == Command::Power => {
                &mut opts.export_limit_report
            }
            "--actuals" if command == Command::Scale => &mut opts.actuals,
            "--series-out" => &mut opts.series_out,
            "--chart-out" => &mut opts.chart_out,
            "--no-chart" => {
                opts.no_chart = true;
                i += 1;
                continue;
            }
            other => return Err(format!("unknown argument: {other}")),
        };
        i += 1;
        let path = args.next_or_err(
            i,
            &format!("missing value for {flag} (expected a file path)"),
        )?;
        if slot.replace(PathBuf::from(path)).is_some() {
            return Err(format!("{flag} provided more than once"));
        }
        i += 1;
    }

    Ok(Parsed::Run(opts))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-report: solar yield and consumption reports from monitoring exports");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  solar-report power [--config <path>] [--report <path>]");
    eprintln!("                     [--export-limit-report <path>] [--series-out <path>]");
    eprintln!("                     [--chart-out <path>] [--no-chart]");
    eprintln!("  solar-report scale [--config <path>] [--actuals <path>]");
    eprintln!("                     [--series-out <path>] [--chart-out <path>] [--no-chart]");
    eprintln!();
    eprintln!("Paths given on the command line override the config file.");
    eprintln!("Set RUST_LOG (e.g. solar_report=debug) for more detailed logs.");
}
