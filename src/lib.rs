//! Solar yield and building consumption reports from energy-monitoring exports.

pub mod cli;
pub mod config;
pub mod error;
/// Normalization, loading, and export of CSV files.
pub mod io;
/// Logging subscriber installation.
pub mod observability;
pub mod pipeline;
/// Power model, alignment, and energy integration.
pub mod power;
/// Text chart rendering.
pub mod render;
/// Reference-building scaling of monthly figures.
pub mod scaling;

pub use error::{LoadError, ReportError, ScaleError};
