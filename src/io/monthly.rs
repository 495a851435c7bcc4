//! Monthly consumption/generation exports (semicolon, decimal comma, quoted).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::scaling::dataset::{MonthlyDataset, MonthlyRecord, month_from_code};

/// Actual 2024 monthly figures of the target building.
pub const EMBEDDED_ACTUALS_2024: &str = r#"time;Elektra Gebouwgebonden;PV Opgewekte energie totaal
"01/2024";0;0
"02/2024";0;0
"03/2024";0;0
"04/2024";2064;0
"05/2024";8611;23753,04734010001
"06/2024";11127;27095,851122600012
"07/2024";10066;18504,712281899978
"08/2024";5687;10496,84760930005
"09/2024";10341;16528,858819200017
"10/2024";9814;12145,381665299967
"11/2024";15287;5113,950433800041
"12/2024";17633;2862,7354859999905
"#;

/// Source column holding the `MM/YYYY` period.
pub const TIME_COLUMN: &str = "time";
/// Source column renamed to consumption.
pub const CONSUMPTION_COLUMN: &str = "Elektra Gebouwgebonden";
/// Source column renamed to generation.
pub const GENERATION_COLUMN: &str = "PV Opgewekte energie totaal";

fn parse_decimal_comma(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

/// Reads a monthly export and returns it in calendar order.
///
/// The month is taken from the first two characters of the period field.
///
/// # Errors
///
/// Returns a `LoadError` on CSV syntax errors, missing columns, unknown or
/// repeated month codes, non-numeric values, or a row count other than 12.
pub fn read_monthly<R: Read>(reader: R) -> Result<MonthlyDataset, LoadError> {
    let origin = "monthly data";
    let csv_err = |source| LoadError::Csv {
        origin: origin.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| LoadError::MissingColumn {
                origin: origin.to_string(),
                column: name.to_string(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };
    let time_idx = position(TIME_COLUMN)?;
    let consumption_idx = position(CONSUMPTION_COLUMN)?;
    let generation_idx = position(GENERATION_COLUMN)?;

    let mut records: Vec<MonthlyRecord> = Vec::with_capacity(12);
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(csv_err)?;

        let period = record.get(time_idx).unwrap_or("");
        let month = period
            .get(..2)
            .and_then(month_from_code)
            .ok_or_else(|| LoadError::MonthCode {
                row,
                value: period.to_string(),
            })?;
        if records.iter().any(|r| r.month == month) {
            return Err(LoadError::DuplicateMonth {
                month: month.name(),
            });
        }

        let value = |idx: usize, column: &str| {
            let raw = record.get(idx).unwrap_or("");
            parse_decimal_comma(raw).ok_or_else(|| LoadError::MonthlyValue {
                row,
                column: column.to_string(),
                value: raw.to_string(),
            })
        };
        records.push(MonthlyRecord {
            month,
            consumption_kwh: value(consumption_idx, CONSUMPTION_COLUMN)?,
            generated_kwh: value(generation_idx, GENERATION_COLUMN)?,
        });
    }

    if records.len() != 12 {
        return Err(LoadError::RowCount {
            expected: 12,
            found: records.len(),
        });
    }

    tracing::info!(rows = records.len(), "loaded monthly data");
    Ok(MonthlyDataset::from_unordered(records))
}

/// Reads the embedded 2024 actuals.
///
/// # Errors
///
/// Only fails if the embedded literal is edited into an invalid shape.
pub fn embedded_actuals() -> Result<MonthlyDataset, LoadError> {
    read_monthly(EMBEDDED_ACTUALS_2024.as_bytes())
}

/// Reads a monthly export file.
///
/// # Errors
///
/// Returns `LoadError::Open` if the file cannot be opened, otherwise see
/// [`read_monthly`].
pub fn load_monthly(path: &Path) -> Result<MonthlyDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_monthly(file)
}
