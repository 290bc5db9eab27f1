//! Analysis View
//! Metric ranking table, top-N bar chart, subscribers-vs-views scatter and summary statistics.

use super::app::ViewAction;
use super::control_panel::ERROR_COLOR;
use super::table;
use crate::charts::ChartPlotter;
use crate::data::{
    ChannelTable, DataProcessor, DerivedData, ProcessorError, RankedChannel, RankingMetric,
};
use egui::{ComboBox, RichText};
use polars::prelude::DataFrame;

/// Everything the analysis view shows for one table and one metric.
pub struct AnalysisFrame {
    pub table_id: u64,
    pub metric: RankingMetric,
    /// Rank, channel name and metric, sorted descending.
    pub ranking: DataFrame,
    pub top: Vec<RankedChannel>,
    /// Over the full table; does not depend on the metric.
    pub scatter: Vec<[f64; 2]>,
}

impl AnalysisFrame {
    pub fn build(
        table: &ChannelTable,
        metric: RankingMetric,
        top_n: usize,
    ) -> Result<Self, ProcessorError> {
        let df = table.dataframe();
        Ok(Self {
            table_id: table.id(),
            metric,
            ranking: DataProcessor::ranking_table(df, metric)?,
            top: DataProcessor::top_n(df, metric, top_n)?,
            scatter: DataProcessor::scatter_points(df)?,
        })
    }
}

#[derive(Default)]
pub struct AnalysisView {
    pub metric: RankingMetric,
    frame: Option<AnalysisFrame>,
}

impl AnalysisView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<&AnalysisFrame> {
        self.frame.as_ref()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        table: &ChannelTable,
        derived: &DerivedData,
        top_n: usize,
    ) -> ViewAction {
        let mut action = ViewAction::None;

        ui.heading("Data Analysis");
        ui.add_space(5.0);

        let stale = self
            .frame
            .as_ref()
            .map_or(true, |f| f.table_id != table.id() || f.metric != self.metric);
        if stale {
            match AnalysisFrame::build(table, self.metric, top_n) {
                Ok(frame) => self.frame = Some(frame),
                Err(e) => {
                    log::error!("Failed to rank channels: {}", e);
                    ui.label(RichText::new(format!("Error: {}", e)).color(ERROR_COLOR));
                    self.frame = None;
                    return action;
                }
            }
        }

        let Some(frame) = &self.frame else {
            return action;
        };
        let metric = &mut self.metric;

        ui.columns(2, |columns| {
            // Column 1: ranking table
            let ui = &mut columns[0];
            ui.label(
                RichText::new("See the most popular YouTuber based on different ranking metrics")
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(5.0);
            ComboBox::from_label("Select a ranking metric")
                .selected_text(metric.column_name())
                .show_ui(ui, |ui| {
                    for option in RankingMetric::ALL {
                        ui.selectable_value(metric, option, option.column_name());
                    }
                });
            ui.label(format!("Ranking based on: {}", frame.metric));
            table::draw_dataframe(ui, "ranking_table", &frame.ranking, 360.0);

            // Column 2: ranking chart
            let ui = &mut columns[1];
            ui.label(
                RichText::new(format!(
                    "Top {} YouTubers ranking by {}",
                    frame.top.len(),
                    frame.metric
                ))
                .size(16.0)
                .strong(),
            );
            ChartPlotter::draw_ranking_chart(ui, &frame.top, frame.metric);
            if ui.button("💾 Save chart as PNG").clicked() {
                action = ViewAction::SaveRankingPng;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.label(
            RichText::new("Scatter Plot: Subscribers vs. Video Views")
                .size(16.0)
                .strong(),
        );
        ChartPlotter::draw_scatter(ui, &frame.scatter);
        if ui.button("💾 Save scatter plot as PNG").clicked() {
            action = ViewAction::SaveScatterPng;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.label(RichText::new("Summary Statistics").size(16.0).strong());
        table::draw_summary_table(ui, &derived.summaries);

        action
    }
}
