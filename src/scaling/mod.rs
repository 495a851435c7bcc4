//! Consumption/generation scaling from a reference building.

pub mod dataset;
pub mod estimator;

pub use dataset::{CALENDAR, MonthlyDataset, MonthlyRecord};
pub use estimator::ScaleEstimator;
