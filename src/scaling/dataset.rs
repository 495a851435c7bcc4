//! Calendar-ordered monthly consumption/generation figures.

use chrono::Month;

/// Canonical January..December order used for every monthly dataset.
pub const CALENDAR: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Position of `month` in [`CALENDAR`].
pub fn calendar_index(month: Month) -> usize {
    CALENDAR.iter().position(|&m| m == month).unwrap_or(0)
}

/// Maps a two-digit code (`"01"`..`"12"`) to its month.
pub fn month_from_code(code: &str) -> Option<Month> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = code.parse().ok()?;
    CALENDAR.get(n.checked_sub(1)?).copied()
}

/// One month of figures for one building (kWh).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRecord {
    pub month: Month,
    pub consumption_kwh: f64,
    pub generated_kwh: f64,
}

/// Twelve monthly records in calendar order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyDataset {
    records: Vec<MonthlyRecord>,
}

impl MonthlyDataset {
    /// Builds a dataset from per-month values given January first.
    ///
    /// # Panics
    ///
    /// Panics unless both slices hold exactly 12 values.
    pub fn from_calendar_values(consumption_kwh: &[f64], generated_kwh: &[f64]) -> Self {
        assert_eq!(consumption_kwh.len(), 12, "consumption needs 12 months");
        assert_eq!(generated_kwh.len(), 12, "generation needs 12 months");
        let records = CALENDAR
            .iter()
            .zip(consumption_kwh.iter().zip(generated_kwh))
            .map(|(&month, (&consumption_kwh, &generated_kwh))| MonthlyRecord {
                month,
                consumption_kwh,
                generated_kwh,
            })
            .collect();
        Self { records }
    }

    /// Orders `records` by [`CALENDAR`], whatever their input order.
    ///
    /// The caller guarantees one record per month.
    pub(crate) fn from_unordered(mut records: Vec<MonthlyRecord>) -> Self {
        records.sort_by_key(|r| calendar_index(r.month));
        Self { records }
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn months(&self) -> impl Iterator<Item = Month> + '_ {
        self.records.iter().map(|r| r.month)
    }

    pub fn consumption_kwh(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.consumption_kwh).collect()
    }

    pub fn generated_kwh(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.generated_kwh).collect()
    }

    pub fn total_consumption_kwh(&self) -> f64 {
        self.records.iter().map(|r| r.consumption_kwh).sum()
    }

    pub fn total_generated_kwh(&self) -> f64 {
        self.records.iter().map(|r| r.generated_kwh).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_codes() {
        assert_eq!(month_from_code("01"), Some(Month::January));
        assert_eq!(month_from_code("09"), Some(Month::September));
        assert_eq!(month_from_code("12"), Some(Month::December));
        assert_eq!(month_from_code("00"), None);
        assert_eq!(month_from_code("13"), None);
        assert_eq!(month_from_code("1"), None);
        assert_eq!(month_from_code("+1"), None);
    }

    #[test]
    fn calendar_names() {
        let names: Vec<&str> = CALENDAR.iter().map(Month::name).collect();
        assert_eq!(names.first(), Some(&"January"));
        assert_eq!(names.last(), Some(&"December"));
        assert_eq!(calendar_index(Month::May), 4);
    }

    #[test]
    fn unordered_records_are_sorted_by_calendar() {
        let mut records: Vec<MonthlyRecord> = CALENDAR
            .iter()
            .map(|&month| MonthlyRecord {
                month,
                consumption_kwh: 1.0,
                generated_kwh: 2.0,
            })
            .collect();
        records.reverse();
        // alphabetical order would put April first
        records.swap(0, 3);
        let ds = MonthlyDataset::from_unordered(records);
        assert!(ds.months().eq(CALENDAR.iter().copied()));
    }

    #[test]
    fn totals() {
        let ds = MonthlyDataset::from_calendar_values(&[1.0; 12], &[0.5; 12]);
        assert_eq!(ds.total_consumption_kwh(), 12.0);
        assert_eq!(ds.total_generated_kwh(), 6.0);
        assert_eq!(ds.records().len(), 12);
    }

    #[test]
    #[should_panic]
    fn short_year_panics() {
        MonthlyDataset::from_calendar_values(&[1.0; 11], &[1.0; 12]);
    }
}
