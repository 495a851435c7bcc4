//! Integration tests for the power/energy pipeline.

mod common;

use std::fs;

use solar_report::config::LeadingTemperature;
use solar_report::io::export::{export_to_path, write_power_csv};
use solar_report::pipeline::run_power;
use solar_report::{LoadError, ReportError};

use common::assert_close;

#[test]
fn fixture_run_produces_expected_energy() {
    let tmp = common::scratch_dir("power-energy");
    let dir = tmp.path();
    let cfg = common::power_fixture(&dir);

    let report = run_power(&cfg).expect("fixture run should succeed");

    // export-limit export is one row shorter, so five samples survive
    assert_eq!(report.curves.len(), 5);
    assert_eq!(report.energy.samples, 5);

    let raw = &report.curves.raw_w;
    assert_close(raw[0], 61_020.093_75);
    assert_close(raw[1], 60_135.302_390_625);
    assert_eq!(raw[2], 0.0);
    assert_close(raw[3], 15_144.424_517_578_125);
    assert_eq!(raw[4], 0.0);

    let adjusted = &report.curves.adjusted_w;
    assert_close(adjusted[0], raw[0]);
    assert_close(adjusted[1], 48_108.241_912_5);

    assert_close(report.energy.raw_wh, 11_358.318_388_183_594);
    assert_close(report.energy.adjusted_wh, 10_356.063_348_339_843);

    let text = report.energy.to_string();
    assert!(text.contains("Total Energy Output: 11358.32 Wh"));
    assert!(text.contains("Total Energy Lost (Due to Export Limit): 10356.06 Wh"));
}

#[test]
fn normalized_copies_are_written_alongside_inputs() {
    let tmp = common::scratch_dir("power-normalized");
    let dir = tmp.path();
    let cfg = common::power_fixture(&dir);
    run_power(&cfg).expect("fixture run should succeed");

    let processed = fs::read_to_string(dir.join("processed_report.csv"))
        .expect("normalized report should exist");
    assert!(processed.contains("\"12.5\";\"22.5\""));
    assert!(processed.contains("\"01-06-2024 12:00\";\"50\";NaN"));
    assert!(!processed.contains(','));

    let limits = fs::read_to_string(dir.join("processed_report(1).csv"))
        .expect("normalized limit report should exist");
    assert!(limits.contains("\"50.5\""));
}

#[test]
fn leading_temperature_gap_can_abort() {
    let tmp = common::scratch_dir("power-leading");
    let dir = tmp.path();
    let mut cfg = common::power_fixture(&dir);
    cfg.power.leading_temperature = LeadingTemperature::Fail;

    let err = run_power(&cfg).expect_err("leading gap must abort");
    assert!(matches!(
        err,
        ReportError::Load(LoadError::LeadingGap { rows: 1, .. })
    ));
}

#[test]
fn missing_export_is_fatal() {
    let tmp = common::scratch_dir("power-missing");
    let dir = tmp.path();
    let mut cfg = common::power_fixture(&dir);
    cfg.power.export_limit_report = dir.join("absent.csv");

    let err = run_power(&cfg).expect_err("missing file must abort");
    assert!(matches!(err, ReportError::Load(LoadError::Open { .. })));
}

#[test]
fn renamed_column_is_fatal() {
    let tmp = common::scratch_dir("power-column");
    let dir = tmp.path();
    let mut cfg = common::power_fixture(&dir);
    cfg.power.light_column = "Lichtintensiteit noord".to_string();

    let err = run_power(&cfg).expect_err("unknown column must abort");
    assert!(err.to_string().contains("Lichtintensiteit noord"));
}

#[test]
fn series_export_matches_aligned_samples() {
    let tmp = common::scratch_dir("power-series");
    let dir = tmp.path();
    let cfg = common::power_fixture(&dir);
    let report = run_power(&cfg).expect("fixture run should succeed");

    let out = dir.join("series.csv");
    export_to_path(&out, |w| write_power_csv(&report.rows, w)).expect("export should succeed");

    let text = fs::read_to_string(&out).expect("export should be readable");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("index,time,"));
    // leading temperature gap filled with the reference temperature
    assert!(lines[1].starts_with("0,2024-06-01 12:00:00,50.0000,20.00,100.00,"));
    assert!(lines[5].starts_with("4,2024-06-01 12:20:00,0.0000,20.00,50.50,"));
}

#[test]
fn chart_is_rendered_when_enabled() {
    let tmp = common::scratch_dir("power-chart");
    let dir = tmp.path();
    let mut cfg = common::power_fixture(&dir);
    cfg.chart.enabled = true;

    let report = run_power(&cfg).expect("fixture run should succeed");
    let chart = report.chart.expect("chart should be rendered");
    assert!(chart.contains("Misgelopen Energie: 10356.06 Wh"));
    assert_eq!(chart.lines().count(), usize::from(cfg.chart.height));
}

/// Swaps the time cells of both fixture exports for `stamp(row)`.
fn restamp(dir: &std::path::Path, stamp: impl Fn(usize) -> String) {
    for (name, text) in [
        ("report.csv", common::LIGHT_REPORT),
        ("report(1).csv", common::LIMIT_REPORT),
    ] {
        let lines: Vec<String> = text
            .lines()
            .enumerate()
            .map(|(i, line)| match (i, line.split_once(';')) {
                (0, _) | (_, None) => line.to_string(),
                (_, Some((_, rest))) => format!("\"{}\";{rest}", stamp(i - 1)),
            })
            .collect();
        fs::write(dir.join(name), lines.join("\n") + "\n").expect("fixture writable");
    }
}

#[test]
fn iso_and_fractional_timestamps_give_the_same_energy() {
    let layouts: [fn(usize) -> String; 2] = [
        |i| format!("2024-06-01 12:{:02}:00", i * 5),
        // decimal comma becomes a point during normalization
        |i| format!("01-06-2024 12:{:02}:00,000", i * 5),
    ];
    for stamp in layouts {
        let tmp = common::scratch_dir("power-stamps");
        let dir = tmp.path();
        let cfg = common::power_fixture(dir);
        restamp(dir, stamp);

        let report = run_power(&cfg).expect("timestamp layout should load");
        assert_close(report.energy.raw_wh, 11_358.318_388_183_594);
        assert_close(report.energy.adjusted_wh, 10_356.063_348_339_843);
        assert!(report.rows.iter().all(|r| r.time.is_some()));
    }
}

#[test]
fn unparseable_timestamps_do_not_abort() {
    let tmp = common::scratch_dir("power-badstamp");
    let dir = tmp.path();
    let cfg = common::power_fixture(dir);
    restamp(dir, |i| match i {
        1 => "n/a".to_string(),
        _ => format!("01-06-2024 12:{:02}", i * 5),
    });

    let report = run_power(&cfg).expect("bad time cell must not abort");
    assert_close(report.energy.raw_wh, 11_358.318_388_183_594);
    assert_eq!(report.rows[1].time, None);

    let out = dir.join("series.csv");
    export_to_path(&out, |w| write_power_csv(&report.rows, w)).expect("export should succeed");
    let text = fs::read_to_string(&out).expect("export should be readable");
    assert!(text.lines().nth(2).is_some_and(|l| l.starts_with("1,,")));
}
