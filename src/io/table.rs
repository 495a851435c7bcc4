//! Loads normalized, semicolon-delimited monitoring exports.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::LoadError;
use crate::power::series::TimeSeries;

/// Timestamp layouts found in the monitoring exports. Day-first layouts come
/// before ISO ones; `%.f` accepts an optional fractional second.
const DATETIME_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Parses an export timestamp, with or without a time of day.
///
/// Ambiguous dates such as `03/04/2024` are read day first.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Coerces a cell to a number; anything unparseable or `NaN` is missing.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// How missing values of a column are replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPolicy {
    /// Every missing value becomes the constant.
    Constant(f64),
    /// Missing values repeat the last known value.
    ForwardFill { leading: LeadingFill },
}

/// Resolution of missing values before the first known one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeadingFill {
    Value(f64),
    Fail,
}

impl FillPolicy {
    /// Replaces every missing value of `column`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::LeadingGap` for a forward-filled column whose first
    /// rows are missing when the leading fill is [`LeadingFill::Fail`].
    pub fn apply(&self, column: &str, values: &[Option<f64>]) -> Result<Vec<f64>, LoadError> {
        let missing = values.iter().filter(|v| v.is_none()).count();
        tracing::debug!(column, missing, policy = ?self, "filling missing values");

        match *self {
            FillPolicy::Constant(fill) => Ok(values.iter().map(|v| v.unwrap_or(fill)).collect()),
            FillPolicy::ForwardFill { leading } => {
                let gap = values.iter().take_while(|v| v.is_none()).count();
                let first = match leading {
                    _ if gap == 0 => None,
                    LeadingFill::Value(v) => {
                        tracing::warn!(
                            column,
                            rows = gap,
                            fill = v,
                            "leading gap filled with fallback value"
                        );
                        Some(v)
                    }
                    LeadingFill::Fail => {
                        return Err(LoadError::LeadingGap {
                            column: column.to_string(),
                            rows: gap,
                        });
                    }
                };

                let mut last = first;
                Ok(values
                    .iter()
                    .map(|v| {
                        if v.is_some() {
                            last = *v;
                        }
                        last.unwrap_or(f64::NAN)
                    })
                    .collect())
            }
        }
    }
}

/// One parsed export: timestamps plus the requested measurement columns.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    pub origin: String,
    /// `None` where the time cell could not be parsed.
    pub timestamps: Vec<Option<NaiveDateTime>>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl MeasurementTable {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Raw (unfilled) values of a loaded column.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingColumn` if the column was not requested at load.
    pub fn column(&self, name: &str) -> Result<&[Option<f64>], LoadError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| LoadError::MissingColumn {
                origin: self.origin.clone(),
                column: name.to_string(),
                available: self
                    .columns
                    .iter()
                    .map(|(n, _)| n.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Fills a column by `policy` and pairs it with the timestamps.
    ///
    /// # Errors
    ///
    /// See [`MeasurementTable::column`] and [`FillPolicy::apply`].
    pub fn series(&self, name: &str, policy: FillPolicy) -> Result<TimeSeries, LoadError> {
        let values = policy.apply(name, self.column(name)?)?;
        Ok(TimeSeries::new(name, self.timestamps.clone(), values))
    }
}

/// Reads a normalized export from `reader`.
///
/// `origin` names the source in errors and logs.
///
/// # Errors
///
/// Returns a `LoadError` on CSV syntax errors or missing columns. Time cells
/// that do not parse are kept as `None` with a warning; they never abort.
pub fn read_table<R: Read>(
    reader: R,
    origin: &str,
    time_column: &str,
    columns: &[&str],
) -> Result<MeasurementTable, LoadError> {
    let csv_err = |source| LoadError::Csv {
        origin: origin.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    let position = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| LoadError::MissingColumn {
                origin: origin.to_string(),
                column: name.to_string(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };

    let time_idx = position(time_column)?;
    let indices = columns
        .iter()
        .map(|&c| position(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut timestamps = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); columns.len()];
    let mut unparsed = 0usize;

    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let raw_time = record.get(time_idx).unwrap_or("");
        let ts = parse_timestamp(raw_time);
        if ts.is_none() {
            if unparsed == 0 {
                tracing::warn!(
                    origin,
                    row = row + 1,
                    value = raw_time,
                    "unparseable timestamp kept as blank"
                );
            }
            unparsed += 1;
        }
        timestamps.push(ts);
        for (slot, &idx) in values.iter_mut().zip(&indices) {
            slot.push(record.get(idx).and_then(parse_measurement));
        }
    }

    if unparsed > 1 {
        tracing::warn!(origin, rows = unparsed, "rows with unparseable timestamps");
    }
    tracing::info!(origin, rows = timestamps.len(), "loaded export");

    Ok(MeasurementTable {
        origin: origin.to_string(),
        timestamps,
        columns: columns
            .iter()
            .map(|c| (*c).to_string())
            .zip(values)
            .collect(),
    })
}

/// Reads a normalized export file.
///
/// # Errors
///
/// Returns `LoadError::Open` if the file cannot be opened, otherwise see
/// [`read_table`].
pub fn load_table(
    path: &Path,
    time_column: &str,
    columns: &[&str],
) -> Result<MeasurementTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(
        file,
        &format!("\"{}\"", path.display()),
        time_column,
        columns,
    )
}
