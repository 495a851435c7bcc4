//! File-level input and output.

/// CSV export of computed series.
pub mod export;
/// Monthly consumption/generation loader.
pub mod monthly;
/// Decimal-comma to decimal-point rewriting.
pub mod normalize;
/// Semicolon-delimited measurement export loader.
pub mod table;
