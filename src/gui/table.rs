//! Table Widgets
//! Scrollable grid views of data frames and the metric summary table.

use crate::charts::ChartPlotter;
use crate::stats::MetricSummary;
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::{AnyValue, DataFrame};

/// Text shown for one cell.
pub fn format_cell(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format_number(*v),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

/// Whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Draw a frame as a striped grid, virtualised over rows.
pub fn draw_dataframe(ui: &mut egui::Ui, id: &str, df: &DataFrame, max_height: f32) {
    let columns = df.get_columns();

    if df.height() == 0 {
        egui::Grid::new(format!("{}_empty", id))
            .striped(true)
            .show(ui, |ui| {
                for column in columns {
                    ui.label(RichText::new(column.name().as_str()).strong());
                }
                ui.end_row();
            });
        ui.label(RichText::new("No rows match the current selection").color(Color32::GRAY));
        return;
    }

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

    ScrollArea::both()
        .id_salt(id)
        .max_height(max_height)
        .auto_shrink([false, true])
        .show_rows(ui, row_height, df.height(), |ui, row_range| {
            egui::Grid::new(format!("{}_grid", id))
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for column in columns {
                        ui.label(RichText::new(column.name().as_str()).strong());
                    }
                    ui.end_row();

                    for row in row_range {
                        for column in columns {
                            let text = column
                                .get(row)
                                .map(|v| format_cell(&v))
                                .unwrap_or_default();
                            ui.label(text);
                        }
                        ui.end_row();
                    }
                });
        });

    ui.label(
        RichText::new(format!("{} rows × {} columns", df.height(), df.width()))
            .size(11.0)
            .color(Color32::GRAY),
    );
}

/// Draw descriptive statistics for each ranking metric.
pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[MetricSummary]) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            egui::Grid::new("metric_summary")
                .striped(true)
                .min_col_width(55.0)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    for header in ["Metric", "N", "Missing", "Mean", "Median", "Std", "Min", "Max", "P95"] {
                        ui.label(RichText::new(header).strong().size(12.0));
                    }
                    ui.end_row();

                    for s in summaries {
                        ui.label(RichText::new(s.metric.display_name()).size(12.0));
                        ui.label(RichText::new(s.count.to_string()).size(12.0));
                        ui.label(RichText::new(s.missing.to_string()).size(12.0));
                        for value in [s.mean, s.median, s.std, s.min, s.max, s.p95] {
                            let text = if value.is_nan() {
                                "-".to_string()
                            } else {
                                ChartPlotter::format_compact(value)
                            };
                            ui.label(RichText::new(text).size(12.0));
                        }
                        ui.end_row();
                    }
                });
        });
}
