//! Positionally aligned measurement series.

use chrono::NaiveDateTime;

/// One measurement column with its timestamps, one value per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub name: String,
    /// `None` for samples whose time cell did not parse.
    pub timestamps: Vec<Option<NaiveDateTime>>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// # Panics
    ///
    /// Panics if `timestamps` and `values` differ in length.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<Option<NaiveDateTime>>,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(timestamps.len(), values.len());
        Self {
            name: name.into(),
            timestamps,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drops every sample from index `len` on.
    pub fn truncate(&mut self, len: usize) {
        self.timestamps.truncate(len);
        self.values.truncate(len);
    }
}

/// Truncates every series to the length of the shortest one.
///
/// Series are matched by position, not by timestamp: the exports are assumed
/// to share one sampling grid and trailing samples of longer series are
/// dropped. Returns the common length.
pub fn align_to_shortest(series: &mut [&mut TimeSeries]) -> usize {
    let n = series.iter().map(|s| s.len()).min().unwrap_or(0);
    for s in series.iter_mut() {
        let dropped = s.len() - n;
        if dropped > 0 {
            tracing::warn!(series = %s.name, dropped, "truncating to shortest series");
        }
        s.truncate(n);
    }
    n
}
