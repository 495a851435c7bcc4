//! Power/energy estimation from light, temperature, and export-limit exports.

/// Riemann-sum energy totals.
pub mod energy;
/// Irradiance, derating, and export-limit power model.
pub mod model;
pub mod series;

pub use energy::EnergyReport;
pub use model::{PhysicalConstants, PowerCurves, PowerInputs};
pub use series::TimeSeries;
