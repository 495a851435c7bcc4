//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use solar_report::config::ReportConfig;
use tempfile::TempDir;

/// Creates a fresh, empty directory that is removed when dropped.
pub fn scratch_dir(tag: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("solar-report-{tag}-"))
        .tempdir()
        .expect("temp dir should be creatable")
}

/// Light/temperature export in the raw monitoring format (decimal comma,
/// `""` for missing fields): six 5-minute samples.
pub const LIGHT_REPORT: &str = "\"time\";\"Lichtintensiteit zuid\";\"Buitentemperatuur\"\n\
\"01-06-2024 12:00\";\"50\";\"\"\n\
\"01-06-2024 12:05\";\"50\";\"25\"\n\
\"01-06-2024 12:10\";\"\";\"\"\n\
\"01-06-2024 12:15\";\"12,5\";\"22,5\"\n\
\"01-06-2024 12:20\";\"0\";\"20\"\n\
\"01-06-2024 12:25\";\"40\";\"30\"\n";

/// Export-limit export, one sample shorter than [`LIGHT_REPORT`].
pub const LIMIT_REPORT: &str = "\"time\";\"Export beperking\"\n\
\"01-06-2024 12:00\";\"\"\n\
\"01-06-2024 12:05\";\"80\"\n\
\"01-06-2024 12:10\";\"80\"\n\
\"01-06-2024 12:15\";\"\"\n\
\"01-06-2024 12:20\";\"50,5\"\n";

/// Writes both raw exports into `dir` and returns a config pointing at them.
pub fn power_fixture(dir: &Path) -> ReportConfig {
    let report = dir.join("report.csv");
    let limits = dir.join("report(1).csv");
    fs::write(&report, LIGHT_REPORT).expect("fixture should be writable");
    fs::write(&limits, LIMIT_REPORT).expect("fixture should be writable");

    let mut cfg = ReportConfig::default();
    cfg.power.report = report;
    cfg.power.export_limit_report = limits;
    cfg.chart.enabled = false;
    cfg
}

/// Relative closeness check for energy and power values.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}
