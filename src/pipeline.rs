//! End-to-end runs of the two report pipelines.

use crate::config::{LeadingTemperature, ReportConfig};
use crate::error::{ReportError, ScaleError};
use crate::io::export::{PowerRow, power_rows};
use crate::io::monthly::{embedded_actuals, load_monthly};
use crate::io::normalize::normalize_alongside;
use crate::io::table::{FillPolicy, LeadingFill, load_table};
use crate::power::energy::EnergyReport;
use crate::power::model::{self, PowerCurves, PowerInputs};
use crate::power::series::align_to_shortest;
use crate::render::{self, MonthlySeries};
use crate::scaling::{MonthlyDataset, ScaleEstimator};

/// Export limit assumed where the limit export has no value (percent).
pub const UNRESTRICTED_EXPORT_PCT: f64 = 100.0;
/// Light intensity assumed where the export has no value (kilolux).
pub const DARK_KLUX: f64 = 0.0;

/// Everything the power/energy pipeline produces.
#[derive(Debug, Clone)]
pub struct PowerReport {
    pub curves: PowerCurves,
    pub energy: EnergyReport,
    pub rows: Vec<PowerRow>,
    pub chart: Option<String>,
}

/// Runs normalization, loading, alignment, the power model, and integration.
///
/// Normalized copies of both exports are written next to the originals.
///
/// # Errors
///
/// Returns a `ReportError` if an export is missing or malformed, a required
/// column is absent, or the temperature column cannot be filled.
pub fn run_power(cfg: &ReportConfig) -> Result<PowerReport, ReportError> {
    let p = &cfg.power;

    let measurements = normalize_alongside(&p.report)?;
    let limits = normalize_alongside(&p.export_limit_report)?;

    let limit_table = load_table(&limits, &p.time_column, &[p.export_limit_column.as_str()])?;
    let mut export_limit = limit_table.series(
        &p.export_limit_column,
        FillPolicy::Constant(UNRESTRICTED_EXPORT_PCT),
    )?;

    let table = load_table(
        &measurements,
        &p.time_column,
        &[p.light_column.as_str(), p.temperature_column.as_str()],
    )?;
    let mut light = table.series(&p.light_column, FillPolicy::Constant(DARK_KLUX))?;
    let leading = match p.leading_temperature {
        LeadingTemperature::Reference => LeadingFill::Value(cfg.panel.reference_temperature_c),
        LeadingTemperature::Fail => LeadingFill::Fail,
    };
    let mut temperature = table.series(&p.temperature_column, FillPolicy::ForwardFill { leading })?;

    let n = align_to_shortest(&mut [&mut light, &mut temperature, &mut export_limit]);
    tracing::info!(samples = n, "aligned series");

    let curves = model::compute(
        &cfg.panel,
        PowerInputs {
            light_klux: &light.values,
            temperature_c: &temperature.values,
            export_limit_pct: &export_limit.values,
        },
    );
    let energy = EnergyReport::from_curves(&curves, p.interval_hours());
    tracing::info!(
        raw_wh = energy.raw_wh,
        adjusted_wh = energy.adjusted_wh,
        curtailed_wh = energy.curtailed_wh(),
        "integrated energy"
    );

    let rows = power_rows(
        &light.timestamps,
        &light.values,
        &temperature.values,
        &export_limit.values,
        &curves,
    );
    let chart = cfg
        .chart
        .enabled
        .then(|| render::power_chart(&curves, &energy, &cfg.chart));

    Ok(PowerReport {
        curves,
        energy,
        rows,
        chart,
    })
}

/// Everything the scaling pipeline produces.
#[derive(Debug, Clone)]
pub struct ScalingReport {
    pub reference: MonthlyDataset,
    pub estimated: MonthlyDataset,
    pub actual: MonthlyDataset,
    pub chart: Option<String>,
}

/// Scales the reference building to the target totals and loads the actuals.
///
/// # Errors
///
/// Returns a `ReportError` if the reference data sums to zero or the monthly
/// actuals cannot be loaded.
pub fn run_scaling(cfg: &ReportConfig) -> Result<ScalingReport, ReportError> {
    let s = &cfg.scaling;
    for (metric, values) in [
        ("consumption", &s.reference_consumption_kwh),
        ("generation", &s.reference_generated_kwh),
    ] {
        if values.len() != 12 {
            return Err(ScaleError::MonthCount {
                metric,
                found: values.len(),
            }
            .into());
        }
    }
    let reference = MonthlyDataset::from_calendar_values(
        &s.reference_consumption_kwh,
        &s.reference_generated_kwh,
    );
    let estimated = ScaleEstimator::new(&reference)
        .estimate(s.target_consumption_kwh, s.target_generated_kwh)?;

    let actual = match &s.actuals {
        Some(path) => load_monthly(path)?,
        None => embedded_actuals()?,
    };

    let chart = cfg.chart.enabled.then(|| {
        render::monthly_chart(
            &MonthlySeries {
                estimated: &estimated,
                actual: &actual,
                reference: cfg.chart.show_reference.then_some(&reference),
            },
            s,
            &cfg.chart,
        )
    });

    Ok(ScalingReport {
        reference,
        estimated,
        actual,
        chart,
    })
}
