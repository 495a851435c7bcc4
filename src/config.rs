//! TOML-based report configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::power::model::PhysicalConstants;

/// Top-level report configuration parsed from TOML.
///
/// Every table is optional and falls back to the values the monitoring
/// reports were originally produced with. Load from TOML with
/// [`ReportConfig::from_toml_file`] or use [`ReportConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Panel array constants for the power model.
    #[serde(default)]
    pub panel: PhysicalConstants,
    /// Inputs and column names of the power/energy pipeline.
    #[serde(default)]
    pub power: PowerConfig,
    /// Reference building data and target totals of the scaling pipeline.
    #[serde(default)]
    pub scaling: ScalingConfig,
    /// Chart output options shared by both pipelines.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// How a temperature column that starts with missing values is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadingTemperature {
    /// Fill the leading gap with the panel reference temperature.
    #[default]
    Reference,
    /// Abort the run.
    Fail,
}

/// Power/energy pipeline inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerConfig {
    /// Raw export holding the light-intensity and temperature columns.
    pub report: PathBuf,
    /// Raw export holding the export-limit column.
    pub export_limit_report: PathBuf,
    /// Timestamp column name.
    pub time_column: String,
    /// Light intensity column (kilolux).
    pub light_column: String,
    /// Outdoor temperature column (°C).
    pub temperature_column: String,
    /// Export limit column (percent).
    pub export_limit_column: String,
    /// Sampling interval of both exports in minutes.
    pub interval_minutes: f64,
    /// Resolution of missing temperatures before the first reading.
    pub leading_temperature: LeadingTemperature,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            report: PathBuf::from("report.csv"),
            export_limit_report: PathBuf::from("report(1).csv"),
            time_column: "time".to_string(),
            light_column: "Lichtintensiteit zuid".to_string(),
            temperature_column: "Buitentemperatuur".to_string(),
            export_limit_column: "Export beperking".to_string(),
            interval_minutes: 5.0,
            leading_temperature: LeadingTemperature::Reference,
        }
    }
}

impl PowerConfig {
    /// Sampling interval in hours.
    pub fn interval_hours(&self) -> f64 {
        self.interval_minutes / 60.0
    }
}

/// Consumption/generation scaling inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScalingConfig {
    /// Reference building monthly consumption, January first (kWh).
    pub reference_consumption_kwh: Vec<f64>,
    /// Reference building monthly generation, January first (kWh).
    pub reference_generated_kwh: Vec<f64>,
    /// Known yearly consumption of the target building (kWh).
    pub target_consumption_kwh: f64,
    /// Known yearly generation of the target building (kWh).
    pub target_generated_kwh: f64,
    /// Monthly actuals file; the embedded 2024 dataset when unset.
    pub actuals: Option<PathBuf>,
    /// Legend label of the reference building.
    pub reference_label: String,
    /// Legend label of the estimated series.
    pub estimate_label: String,
    /// Legend label of the actual series.
    pub actuals_label: String,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            reference_consumption_kwh: vec![
                20692.552058400062,
                17757.562031700043,
                19765.793057489907,
                12843.537025180063,
                11116.710010960058,
                18039.977001239953,
                12436.120971489872,
                9014.50597754016,
                15779.806990099954,
                11757.95300706994,
                18861.22905676003,
                16967.646026179893,
            ],
            reference_generated_kwh: vec![
                1245.8249984400027,
                2716.2750007499853,
                5206.800000069998,
                8563.500009900017,
                12422.250011630022,
                13765.57499645,
                13237.64997920995,
                8970.074988159933,
                7299.900001130009,
                3633.22499632003,
                1635.0750044900342,
                821.2499997699633,
            ],
            target_consumption_kwh: 289_000.0,
            target_generated_kwh: 90_920.0,
            actuals: None,
            reference_label: "Citadel 2023".to_string(),
            estimate_label: "Passie".to_string(),
            actuals_label: "De Passie 2024".to_string(),
        }
    }
}

/// Chart output options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Draw the chart at all.
    pub enabled: bool,
    /// Chart width in character cells.
    pub width: u16,
    /// Chart height in character cells.
    pub height: u16,
    /// Also draw the power curve before the export limit.
    pub show_raw: bool,
    /// Also draw the reference building's own monthly series.
    pub show_reference: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 100,
            height: 30,
            show_raw: false,
            show_reference: false,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"panel.panel_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ReportConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.panel;
        if p.panel_count == 0 {
            errors.push(ConfigError::new("panel.panel_count", "must be > 0"));
        }
        if !(p.reference_irradiance_w_m2 > 0.0) {
            errors.push(ConfigError::new(
                "panel.reference_irradiance_w_m2",
                "must be > 0",
            ));
        }
        if !(p.nominal_power_w >= 0.0) {
            errors.push(ConfigError::new("panel.nominal_power_w", "must be >= 0"));
        }
        if !(p.lux_to_irradiance > 0.0) {
            errors.push(ConfigError::new("panel.lux_to_irradiance", "must be > 0"));
        }
        if !p.temperature_coefficient.is_finite() {
            errors.push(ConfigError::new(
                "panel.temperature_coefficient",
                "must be a finite number",
            ));
        }
        if !p.reference_temperature_c.is_finite() {
            errors.push(ConfigError::new(
                "panel.reference_temperature_c",
                "must be a finite number",
            ));
        }

        let pw = &self.power;
        if !(pw.interval_minutes > 0.0) {
            errors.push(ConfigError::new("power.interval_minutes", "must be > 0"));
        }
        for (field, name) in [
            ("power.time_column", &pw.time_column),
            ("power.light_column", &pw.light_column),
            ("power.temperature_column", &pw.temperature_column),
            ("power.export_limit_column", &pw.export_limit_column),
        ] {
            if name.trim().is_empty() {
                errors.push(ConfigError::new(field, "must not be empty"));
            }
        }

        let s = &self.scaling;
        for (field, values) in [
            ("scaling.reference_consumption_kwh", &s.reference_consumption_kwh),
            ("scaling.reference_generated_kwh", &s.reference_generated_kwh),
        ] {
            if values.len() != 12 {
                errors.push(ConfigError::new(
                    field,
                    format!("must hold 12 monthly values, got {}", values.len()),
                ));
            } else if values.iter().any(|v| !v.is_finite()) {
                errors.push(ConfigError::new(field, "values must be finite"));
            }
        }
        for (field, total) in [
            ("scaling.target_consumption_kwh", s.target_consumption_kwh),
            ("scaling.target_generated_kwh", s.target_generated_kwh),
        ] {
            if !(total >= 0.0) || !total.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number >= 0"));
            }
        }

        let c = &self.chart;
        if c.width < 20 {
            errors.push(ConfigError::new("chart.width", "must be >= 20"));
        }
        if c.height < 8 {
            errors.push(ConfigError::new("chart.height", "must be >= 8"));
        }

        errors
    }
}
