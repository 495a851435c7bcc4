//! solar-report entry point: CLI wiring and config-driven pipeline runs.

use std::fs;
use std::path::Path;
use std::process;

use solar_report::cli::{self, CliOptions, Command, Parsed};
use solar_report::config::ReportConfig;
use solar_report::io::export::{export_to_path, write_monthly_csv, write_power_csv};
use solar_report::observability::init_tracing;
use solar_report::pipeline::{run_power, run_scaling};

fn load_config(opts: &CliOptions) -> ReportConfig {
    let mut config = if let Some(ref path) = opts.config {
        match ReportConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ReportConfig::default()
    };

    // Command-line paths win over the config file
    if let Some(ref p) = opts.report {
        config.power.report = p.clone();
    }
    if let Some(ref p) = opts.export_limit_report {
        config.power.export_limit_report = p.clone();
    }
    if let Some(ref p) = opts.actuals {
        config.scaling.actuals = Some(p.clone());
    }
    if opts.no_chart {
        config.chart.enabled = false;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn emit_chart(chart: Option<String>, out: Option<&Path>) {
    let Some(chart) = chart else {
        return;
    };
    match out {
        Some(path) => {
            if let Err(e) = fs::write(path, chart) {
                eprintln!("error: failed to write chart to \"{}\": {e}", path.display());
                process::exit(1);
            }
            tracing::info!(path = %path.display(), "chart written");
        }
        None => print!("\n{chart}"),
    }
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(Parsed::Run(opts)) => opts,
        Ok(Parsed::Help) => {
            cli::print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    init_tracing();
    let config = load_config(&opts);

    match opts.command {
        Command::Power => {
            let report = run_power(&config).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                process::exit(1);
            });

            println!("{}", report.energy);

            if let Some(ref path) = opts.series_out {
                if let Err(e) = export_to_path(path, |w| write_power_csv(&report.rows, w)) {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            }
            emit_chart(report.chart, opts.chart_out.as_deref());
        }
        Command::Scale => {
            let report = run_scaling(&config).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                process::exit(1);
            });

            if let Some(ref path) = opts.series_out {
                if let Err(e) = export_to_path(path, |w| {
                    write_monthly_csv(&report.estimated, &report.actual, w)
                }) {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            }
            emit_chart(report.chart, opts.chart_out.as_deref());
        }
    }
}
