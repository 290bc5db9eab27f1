//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot.

use crate::data::{CategoryCount, RankedChannel, RankingMetric};
use egui::Color32;
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250); // Indigo
pub const RANKING_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const SCATTER_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Steel blue

const CHART_HEIGHT: f32 = 320.0;

/// Draws the explorer and analysis charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Format large counts as `1.5K`, `12.3M`, `4.1B`.
    pub fn format_compact(value: f64) -> String {
        let abs = value.abs();
        let (scaled, suffix) = if abs >= 1e9 {
            (value / 1e9, "B")
        } else if abs >= 1e6 {
            (value / 1e6, "M")
        } else if abs >= 1e3 {
            (value / 1e3, "K")
        } else {
            (value, "")
        };

        let formatted = format!("{:.1}", scaled);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        format!("{}{}", trimmed, suffix)
    }

    /// Label for an integer bar position, empty between bars and out of range.
    pub fn category_axis_label(labels: &[String], value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }

    /// Bar chart of channel counts per category ("Number of YouTubers in Each Category").
    pub fn draw_category_distribution(ui: &mut egui::Ui, counts: &[CategoryCount]) {
        let labels: Vec<String> = counts.iter().map(|c| c.category.clone()).collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.count as f64)
                    .name(&c.category)
                    .width(0.7)
            })
            .collect();

        Plot::new("category_distribution")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Category")
            .y_axis_label("Count")
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                Self::category_axis_label(&labels, mark.value)
            })
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Count"));
            });
    }

    /// Bar chart of the top channels by the selected metric.
    pub fn draw_ranking_chart(ui: &mut egui::Ui, ranked: &[RankedChannel], metric: RankingMetric) {
        let labels: Vec<String> = ranked.iter().map(|r| r.name.clone()).collect();
        let bars: Vec<Bar> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| Bar::new(i as f64, r.value).name(&r.name).width(0.7))
            .collect();

        Plot::new(format!("ranking_{}", metric.column_name()))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Youtuber")
            .y_axis_label(format!("Number of {}", metric))
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                Self::category_axis_label(&labels, mark.value)
            })
            .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                Self::format_compact(mark.value)
            })
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(RANKING_COLOR)
                        .name(metric.display_name()),
                );
            });
    }

    /// Scatter of subscribers (x) against video views (y).
    pub fn draw_scatter(ui: &mut egui::Ui, points: &[[f64; 2]]) {
        Plot::new("subscribers_vs_views")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(RankingMetric::Subscribers.display_name())
            .y_axis_label(RankingMetric::VideoViews.display_name())
            .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                Self::format_compact(mark.value)
            })
            .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                Self::format_compact(mark.value)
            })
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.to_vec()))
                        .radius(2.5)
                        .color(SCATTER_COLOR.gamma_multiply(0.5))
                        .name("Channels"),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_numbers() {
        assert_eq!(ChartPlotter::format_compact(0.0), "0");
        assert_eq!(ChartPlotter::format_compact(950.0), "950");
        assert_eq!(ChartPlotter::format_compact(1_500.0), "1.5K");
        assert_eq!(ChartPlotter::format_compact(12_000_000.0), "12M");
        assert_eq!(ChartPlotter::format_compact(198_459_090_822.0), "198.5B");
    }

    #[test]
    fn axis_labels_only_on_bar_positions() {
        let labels = vec!["Music".to_string(), "Gaming".to_string()];
        assert_eq!(ChartPlotter::category_axis_label(&labels, 0.0), "Music");
        assert_eq!(ChartPlotter::category_axis_label(&labels, 1.0), "Gaming");
        assert_eq!(ChartPlotter::category_axis_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::category_axis_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::category_axis_label(&labels, -1.0), "");
    }
}
