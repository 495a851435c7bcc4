//! CSV export of computed series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::LoadError;
use crate::power::model::PowerCurves;
use crate::scaling::dataset::MonthlyDataset;

/// Column header of the power series export.
const POWER_HEADER: &str = "index,time,light_klux,temperature_c,export_limit_pct,raw_w,adjusted_w";

/// Column header of the monthly comparison export.
const MONTHLY_HEADER: &str = "month,estimated_consumption_kwh,estimated_generated_kwh,\
                              actual_consumption_kwh,actual_generated_kwh";

/// One aligned sample of the power pipeline, inputs and outputs side by side.
#[derive(Debug, Clone, Copy)]
pub struct PowerRow {
    /// Exported as an empty cell when the source timestamp did not parse.
    pub time: Option<NaiveDateTime>,
    pub light_klux: f64,
    pub temperature_c: f64,
    pub export_limit_pct: f64,
    pub raw_w: f64,
    pub adjusted_w: f64,
}

/// Zips aligned inputs with their computed curves.
pub fn power_rows(
    timestamps: &[Option<NaiveDateTime>],
    light_klux: &[f64],
    temperature_c: &[f64],
    export_limit_pct: &[f64],
    curves: &PowerCurves,
) -> Vec<PowerRow> {
    (0..curves.len().min(timestamps.len()))
        .map(|i| PowerRow {
            time: timestamps[i],
            light_klux: light_klux[i],
            temperature_c: temperature_c[i],
            export_limit_pct: export_limit_pct[i],
            raw_w: curves.raw_w[i],
            adjusted_w: curves.adjusted_w[i],
        })
        .collect()
}

/// Writes power rows as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_power_csv(rows: &[PowerRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(POWER_HEADER.split(','))?;
    for (i, r) in rows.iter().enumerate() {
        wtr.write_record(&[
            i.to_string(),
            r.time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            format!("{:.4}", r.light_klux),
            format!("{:.2}", r.temperature_c),
            format!("{:.2}", r.export_limit_pct),
            format!("{:.4}", r.raw_w),
            format!("{:.4}", r.adjusted_w),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the estimated and actual monthly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(
    estimated: &MonthlyDataset,
    actual: &MonthlyDataset,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(MONTHLY_HEADER.split(',').map(str::trim))?;
    for (e, a) in estimated.records().iter().zip(actual.records()) {
        wtr.write_record(&[
            e.month.name().to_string(),
            format!("{:.4}", e.consumption_kwh),
            format!("{:.4}", e.generated_kwh),
            format!("{:.4}", a.consumption_kwh),
            format!("{:.4}", a.generated_kwh),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates `path` and hands a buffered writer to `write`.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be created or written.
pub fn export_to_path<F>(path: &Path, write: F) -> Result<(), LoadError>
where
    F: FnOnce(io::BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|source| LoadError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write(io::BufWriter::new(file)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "series written");
    Ok(())
}
