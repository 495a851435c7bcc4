//! Text charts drawn with ratatui's `Chart` widget into an off-screen buffer.

pub mod style;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget};

use crate::config::{ChartConfig, ScalingConfig};
use crate::power::energy::EnergyReport;
use crate::power::model::PowerCurves;
use crate::scaling::dataset::MonthlyDataset;

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

fn line_dataset<'a>(name: String, data: &'a [(f64, f64)], color: ratatui::style::Color) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

/// Renders `widget` into a `width` x `height` buffer and returns its text.
pub fn draw_to_string(widget: impl Widget, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Flattens a buffer to text, one line per row, trailing blanks trimmed.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buf.cell((x, y)).map_or(" ", |c| c.symbol()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Power chart: adjusted power per data point with the energy annotation.
pub fn power_chart(curves: &PowerCurves, energy: &EnergyReport, chart: &ChartConfig) -> String {
    let adjusted = indexed(&curves.adjusted_w);
    let raw = indexed(&curves.raw_w);

    let mut datasets = vec![line_dataset(
        "Adjusted Power Output".to_string(),
        &adjusted,
        style::ADJUSTED_COLOR,
    )];
    let y_bounds = if chart.show_raw {
        datasets.push(line_dataset(
            "Raw Power Output".to_string(),
            &raw,
            style::RAW_COLOR,
        ));
        style::auto_bounds_y(&[&adjusted, &raw])
    } else {
        style::auto_bounds_y(&[&adjusted])
    };

    let x_hi = (curves.len().max(2) - 1) as f64;
    let x_bounds = [0.0, x_hi];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Solar Panel Power Output and Energy Losses ")
                .title_bottom(Line::from(format!(
                    " Misgelopen Energie: {:.2} Wh ",
                    energy.adjusted_wh
                )))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Data Points")
                .bounds(x_bounds)
                .labels(style::axis_labels(x_bounds, 3, 0)),
        )
        .y_axis(
            Axis::default()
                .title("Power (W)")
                .bounds(y_bounds)
                .labels(style::axis_labels(y_bounds, 3, 0)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    draw_to_string(widget, chart.width, chart.height)
}

/// Series drawn on the monthly comparison chart.
pub struct MonthlySeries<'a> {
    pub estimated: &'a MonthlyDataset,
    pub actual: &'a MonthlyDataset,
    pub reference: Option<&'a MonthlyDataset>,
}

/// Monthly chart: estimated and actual consumption/generation, January..December.
pub fn monthly_chart(series: &MonthlySeries<'_>, labels: &ScalingConfig, chart: &ChartConfig) -> String {
    let est_consumption = indexed(&series.estimated.consumption_kwh());
    let est_generated = indexed(&series.estimated.generated_kwh());
    let act_consumption = indexed(&series.actual.consumption_kwh());
    let act_generated = indexed(&series.actual.generated_kwh());
    let (ref_consumption, ref_generated) = series.reference.map_or_else(
        || (Vec::new(), Vec::new()),
        |r| (indexed(&r.consumption_kwh()), indexed(&r.generated_kwh())),
    );

    let mut datasets = Vec::with_capacity(6);
    if series.reference.is_some() {
        datasets.push(line_dataset(
            format!("Consumption (kWh) - {}", labels.reference_label),
            &ref_consumption,
            style::REFERENCE_COLOR,
        ));
        datasets.push(line_dataset(
            format!("Generation (kWh) - {}", labels.reference_label),
            &ref_generated,
            style::REFERENCE_COLOR,
        ));
    }
    datasets.push(line_dataset(
        format!("Estimated Consumption (kWh) - {}", labels.estimate_label),
        &est_consumption,
        style::ESTIMATED_CONSUMPTION_COLOR,
    ));
    datasets.push(line_dataset(
        format!("Estimated Generation (kWh) - {}", labels.estimate_label),
        &est_generated,
        style::ESTIMATED_GENERATION_COLOR,
    ));
    datasets.push(line_dataset(
        format!("Consumption (kWh) - {}", labels.actuals_label),
        &act_consumption,
        style::ACTUAL_CONSUMPTION_COLOR,
    ));
    datasets.push(line_dataset(
        format!("Generation (kWh) - {}", labels.actuals_label),
        &act_generated,
        style::ACTUAL_GENERATION_COLOR,
    ));

    let y_bounds = style::auto_bounds_y(&[
        &est_consumption,
        &est_generated,
        &act_consumption,
        &act_generated,
        &ref_consumption,
        &ref_generated,
    ]);
    let month_labels: Vec<String> = series
        .estimated
        .months()
        .map(|m| m.name()[..3].to_string())
        .collect();

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Actual and estimated consumption and generation ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Month")
                .bounds([0.0, 11.0])
                .labels(month_labels),
        )
        .y_axis(
            Axis::default()
                .title("Energy (kWh)")
                .bounds(y_bounds)
                .labels(style::axis_labels(y_bounds, 3, 0)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    draw_to_string(widget, chart.width, chart.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::monthly::embedded_actuals;

    fn chart_config() -> ChartConfig {
        ChartConfig {
            width: 100,
            height: 30,
            ..ChartConfig::default()
        }
    }

    #[test]
    fn power_chart_has_title_legend_and_annotation() {
        let curves = PowerCurves {
            raw_w: vec![0.0, 1000.0, 3000.0, 2000.0, 0.0],
            adjusted_w: vec![0.0, 800.0, 2400.0, 1600.0, 0.0],
        };
        let energy = EnergyReport::from_curves(&curves, 1.0 / 12.0);
        let text = power_chart(&curves, &energy, &chart_config());
        assert_eq!(text.lines().count(), 30);
        assert!(text.contains("Solar Panel Power Output and Energy Losses"));
        assert!(text.contains("Adjusted Power Output"));
        assert!(!text.contains("Raw Power Output"));
        assert!(text.contains("Misgelopen Energie: 400.00 Wh"));
    }

    #[test]
    fn power_chart_can_show_raw_curve() {
        let curves = PowerCurves {
            raw_w: vec![0.0, 1000.0],
            adjusted_w: vec![0.0, 500.0],
        };
        let energy = EnergyReport::from_curves(&curves, 1.0);
        let cfg = ChartConfig {
            show_raw: true,
            ..chart_config()
        };
        let text = power_chart(&curves, &energy, &cfg);
        assert!(text.contains("Raw Power Output"));
    }

    #[test]
    fn empty_power_chart_still_renders() {
        let curves = PowerCurves::default();
        let energy = EnergyReport::from_curves(&curves, 1.0 / 12.0);
        let text = power_chart(&curves, &energy, &chart_config());
        assert!(text.contains("Misgelopen Energie: 0.00 Wh"));
    }

    #[test]
    fn monthly_chart_lists_all_series() {
        let actual = embedded_actuals().expect("embedded data is valid");
        let estimated = MonthlyDataset::from_calendar_values(&[20_000.0; 12], &[7_000.0; 12]);
        let labels = ScalingConfig::default();
        let text = monthly_chart(
            &MonthlySeries {
                estimated: &estimated,
                actual: &actual,
                reference: None,
            },
            &labels,
            &chart_config(),
        );
        assert!(text.contains("Estimated Consumption (kWh) - Passie"));
        assert!(text.contains("Estimated Generation (kWh) - Passie"));
        assert!(text.contains("Consumption (kWh) - De Passie 2024"));
        assert!(text.contains("Generation (kWh) - De Passie 2024"));
        assert!(!text.contains("Citadel 2023"));
        assert!(text.contains("Jan"));
        assert!(text.contains("Dec"));
    }

    #[test]
    fn buffer_lines_are_trimmed() {
        let text = draw_to_string(Block::default().borders(Borders::ALL), 10, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].chars().count(), 10);
        assert!(!lines[1].ends_with(' '));
    }
}
