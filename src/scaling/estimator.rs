//! Proportional monthly estimates for a building known only by its yearly totals.

use crate::error::ScaleError;

use super::dataset::MonthlyDataset;

/// Splits `target_total` over the months in the proportions of `reference`.
///
/// Each estimate is `reference[m] / sum(reference) * target_total`, so the
/// estimates add up to `target_total` up to rounding.
///
/// # Errors
///
/// Returns `ScaleError::MonthCount` unless `reference` holds 12 values and
/// `ScaleError::ZeroReferenceTotal` if they sum to zero.
pub fn scale_months(
    metric: &'static str,
    reference: &[f64],
    target_total: f64,
) -> Result<Vec<f64>, ScaleError> {
    if reference.len() != 12 {
        return Err(ScaleError::MonthCount {
            metric,
            found: reference.len(),
        });
    }
    let total: f64 = reference.iter().sum();
    if total == 0.0 {
        return Err(ScaleError::ZeroReferenceTotal { metric });
    }
    Ok(reference
        .iter()
        .map(|v| v / total * target_total)
        .collect())
}

/// Scales a reference building's monthly profile to another building.
#[derive(Debug, Clone)]
pub struct ScaleEstimator<'a> {
    reference: &'a MonthlyDataset,
}

impl<'a> ScaleEstimator<'a> {
    pub fn new(reference: &'a MonthlyDataset) -> Self {
        Self { reference }
    }

    /// Estimates the target building's months from its yearly totals.
    ///
    /// # Errors
    ///
    /// Returns `ScaleError::ZeroReferenceTotal` if a reference metric sums to zero.
    pub fn estimate(
        &self,
        target_consumption_kwh: f64,
        target_generated_kwh: f64,
    ) -> Result<MonthlyDataset, ScaleError> {
        let consumption = scale_months(
            "consumption",
            &self.reference.consumption_kwh(),
            target_consumption_kwh,
        )?;
        let generated = scale_months(
            "generation",
            &self.reference.generated_kwh(),
            target_generated_kwh,
        )?;
        tracing::debug!(
            target_consumption_kwh,
            target_generated_kwh,
            "scaled reference profile"
        );
        Ok(MonthlyDataset::from_calendar_values(&consumption, &generated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScalingConfig;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn reference() -> MonthlyDataset {
        let cfg = ScalingConfig::default();
        MonthlyDataset::from_calendar_values(
            &cfg.reference_consumption_kwh,
            &cfg.reference_generated_kwh,
        )
    }

    fn assert_rel_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() <= 1e-6 * b.abs().max(1.0),
            "{a} != {b} within relative tolerance"
        );
    }

    #[test]
    fn default_reference_first_months() {
        let reference = reference();
        let est = ScaleEstimator::new(&reference)
            .estimate(289_000.0, 90_920.0)
            .expect("reference totals are non-zero");
        let january = est.records()[0];
        let february = est.records()[1];
        assert_rel_eq(january.consumption_kwh, 32_319.288_107_945_67);
        assert_rel_eq(february.consumption_kwh, 27_735.185_190_183_125);
        assert_rel_eq(january.generated_kwh, 1_424.473_245_826_095);
        assert_rel_eq(february.generated_kwh, 3_105.782_169_822_906);
    }

    #[test]
    fn estimates_sum_to_target_total() {
        let reference = reference();
        let est = ScaleEstimator::new(&reference)
            .estimate(289_000.0, 90_920.0)
            .expect("reference totals are non-zero");
        assert_rel_eq(est.total_consumption_kwh(), 289_000.0);
        assert_rel_eq(est.total_generated_kwh(), 90_920.0);
    }

    #[test]
    fn round_trip_for_random_profiles() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let profile: Vec<f64> = (0..12).map(|_| rng.random_range(0.0..50_000.0)).collect();
            let target = rng.random_range(1.0..1_000_000.0);
            let months = scale_months("consumption", &profile, target).expect("non-zero profile");
            assert_rel_eq(months.iter().sum(), target);
        }
    }

    #[test]
    fn zero_reference_is_rejected() {
        let err = scale_months("generation", &[0.0; 12], 100.0).expect_err("must fail");
        assert!(matches!(
            err,
            ScaleError::ZeroReferenceTotal {
                metric: "generation"
            }
        ));
    }

    #[test]
    fn wrong_month_count_is_rejected() {
        let err = scale_months("consumption", &[1.0; 11], 100.0).expect_err("must fail");
        assert!(matches!(err, ScaleError::MonthCount { found: 11, .. }));
    }

    #[test]
    fn zero_months_in_reference_stay_zero() {
        let mut profile = [10.0; 12];
        profile[0] = 0.0;
        let months = scale_months("generation", &profile, 55.0).expect("non-zero profile");
        assert_eq!(months[0], 0.0);
        assert_rel_eq(months[1], 5.0);
    }
}
