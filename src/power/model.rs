//! Irradiance-based power model with temperature derating and export limit.

use serde::Deserialize;

/// Panel array constants, fixed for the whole run.
///
/// The rating is defined at NOCT: `nominal_power_w` is produced at
/// `reference_irradiance_w_m2` and `reference_temperature_c`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicalConstants {
    /// Nominal power of one panel at NOCT (W).
    pub nominal_power_w: f64,
    /// Irradiance at NOCT (W/m²).
    pub reference_irradiance_w_m2: f64,
    /// Relative power change per °C above the reference temperature.
    pub temperature_coefficient: f64,
    /// Cell reference temperature (°C).
    pub reference_temperature_c: f64,
    /// Number of panels in the array.
    pub panel_count: u32,
    /// Empirical illuminance to irradiance factor (W/m² per lux).
    pub lux_to_irradiance: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            nominal_power_w: 321.0,
            reference_irradiance_w_m2: 800.0,
            temperature_coefficient: -0.0029,
            reference_temperature_c: 20.0,
            panel_count: 385,
            lux_to_irradiance: 0.0079,
        }
    }
}

/// Aligned input series for [`compute`]; all three must have equal length.
#[derive(Debug, Clone, Copy)]
pub struct PowerInputs<'a> {
    /// Light intensity (kilolux).
    pub light_klux: &'a [f64],
    /// Outdoor temperature (°C).
    pub temperature_c: &'a [f64],
    /// Export limit (percent of raw output allowed onto the grid).
    pub export_limit_pct: &'a [f64],
}

/// Power before and after the export limit, one value per sample (W).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerCurves {
    pub raw_w: Vec<f64>,
    pub adjusted_w: Vec<f64>,
}

impl PowerCurves {
    pub fn len(&self) -> usize {
        self.raw_w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_w.is_empty()
    }
}

/// Irradiance seen by the whole array for a light reading (W/m²).
///
/// The conversion is applied once to the array total, which is how the
/// existing reports were produced; keep the multiplication order.
pub fn array_irradiance_w_m2(constants: &PhysicalConstants, light_klux: f64) -> f64 {
    light_klux * constants.lux_to_irradiance * 1000.0 * f64::from(constants.panel_count)
}

/// Temperature-derated array power, floored at zero (W).
pub fn raw_power_w(constants: &PhysicalConstants, light_klux: f64, temperature_c: f64) -> f64 {
    let irradiance = array_irradiance_w_m2(constants, light_klux);
    let mut power =
        constants.nominal_power_w * (irradiance / constants.reference_irradiance_w_m2);
    power *= 1.0
        + constants.temperature_coefficient * (temperature_c - constants.reference_temperature_c);
    power.max(0.0)
}

/// Share of `raw_w` that may be exported under `export_limit_pct`.
pub fn export_limited_w(raw_w: f64, export_limit_pct: f64) -> f64 {
    raw_w * (export_limit_pct / 100.0)
}

/// Computes raw and export-limited power for every sample.
///
/// # Panics
///
/// Panics if the input series differ in length.
pub fn compute(constants: &PhysicalConstants, inputs: PowerInputs<'_>) -> PowerCurves {
    let n = inputs.light_klux.len();
    assert!(
        inputs.temperature_c.len() == n && inputs.export_limit_pct.len() == n,
        "power inputs must be aligned before modelling"
    );

    let raw_w: Vec<f64> = inputs
        .light_klux
        .iter()
        .zip(inputs.temperature_c)
        .map(|(&lux, &temp)| raw_power_w(constants, lux, temp))
        .collect();
    let adjusted_w = raw_w
        .iter()
        .zip(inputs.export_limit_pct)
        .map(|(&raw, &pct)| export_limited_w(raw, pct))
        .collect();

    PowerCurves { raw_w, adjusted_w }
}
