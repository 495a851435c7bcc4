//! Series colors and axis scaling helpers.

use ratatui::style::Color;

/// Export-limited power line.
pub const ADJUSTED_COLOR: Color = Color::Green;
/// Raw power line.
pub const RAW_COLOR: Color = Color::Red;
/// Estimated consumption line.
pub const ESTIMATED_CONSUMPTION_COLOR: Color = Color::Rgb(255, 127, 14);
/// Estimated generation line.
pub const ESTIMATED_GENERATION_COLOR: Color = Color::Rgb(44, 160, 44);
/// Actual consumption line.
pub const ACTUAL_CONSUMPTION_COLOR: Color = Color::Rgb(214, 39, 40);
/// Actual generation line.
pub const ACTUAL_GENERATION_COLOR: Color = Color::Rgb(31, 119, 180);
/// Reference building lines.
pub const REFERENCE_COLOR: Color = Color::DarkGray;

/// Computes Y-axis bounds over every series with 10% padding.
///
/// Non-negative data keeps zero as the lower bound.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    let lo = if min >= 0.0 { 0.0 } else { min - pad };
    [lo, max + pad]
}

/// Evenly spaced axis labels between `bounds`, inclusive.
pub fn axis_labels(bounds: [f64; 2], count: usize, decimals: usize) -> Vec<String> {
    let count = count.max(2);
    let step = (bounds[1] - bounds[0]) / (count - 1) as f64;
    (0..count)
        .map(|i| format!("{:.*}", decimals, bounds[0] + step * i as f64))
        .collect()
}
