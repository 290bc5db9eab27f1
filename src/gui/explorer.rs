//! Explorer View
//! Category filter, row preview, CSV download and the category distribution chart.

use super::app::ViewAction;
use super::control_panel::ERROR_COLOR;
use super::table;
use crate::charts::ChartPlotter;
use crate::data::{CategoryFilter, ChannelTable, DataProcessor, DerivedData, ProcessorError};
use egui::{ComboBox, RichText};
use polars::prelude::DataFrame;

/// Rows previewed when no category is selected.
pub const PREVIEW_ROWS: usize = 5;

/// Everything the explorer shows for one table and one selection.
pub struct ExplorerFrame {
    pub table_id: u64,
    pub filter: CategoryFilter,
    pub caption: String,
    pub preview: DataFrame,
    pub filtered: DataFrame,
}

impl ExplorerFrame {
    pub fn build(table: &ChannelTable, filter: &CategoryFilter) -> Result<Self, ProcessorError> {
        let filtered = DataProcessor::filter_by_category(table.dataframe(), filter)?;
        let (caption, preview) = match filter {
            CategoryFilter::All => (
                "The data you want to see".to_string(),
                filtered.head(Some(PREVIEW_ROWS)),
            ),
            CategoryFilter::Only(category) => {
                (format!("You have selected {}", category), filtered.clone())
            }
        };

        Ok(Self {
            table_id: table.id(),
            filter: filter.clone(),
            caption,
            preview,
            filtered,
        })
    }

    fn is_current(&self, table: &ChannelTable, filter: &CategoryFilter) -> bool {
        self.table_id == table.id() && &self.filter == filter
    }
}

#[derive(Default)]
pub struct ExplorerView {
    pub selected: CategoryFilter,
    frame: Option<ExplorerFrame>,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows matching the current selection, for the download.
    pub fn filtered_data(&self) -> Option<&DataFrame> {
        self.frame.as_ref().map(|f| &f.filtered)
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &ChannelTable, derived: &DerivedData) -> ViewAction {
        let mut action = ViewAction::None;

        ui.heading("Data Explorer");
        ui.add_space(5.0);

        let options = CategoryFilter::options(&derived.categories);
        ComboBox::from_label("Select the category")
            .width(220.0)
            .selected_text(self.selected.label())
            .show_ui(ui, |ui| {
                for option in options {
                    let label = option.label().to_string();
                    ui.selectable_value(&mut self.selected, option, label);
                }
            });

        let stale = self
            .frame
            .as_ref()
            .map_or(true, |f| !f.is_current(table, &self.selected));
        if stale {
            match ExplorerFrame::build(table, &self.selected) {
                Ok(frame) => {
                    log::debug!(
                        "Explorer filter '{}' matched {} rows",
                        frame.filter.label(),
                        frame.filtered.height()
                    );
                    self.frame = Some(frame);
                }
                Err(e) => {
                    log::error!("Failed to filter data: {}", e);
                    ui.label(RichText::new(format!("Error: {}", e)).color(ERROR_COLOR));
                    self.frame = None;
                    return action;
                }
            }
        }

        if let Some(frame) = &self.frame {
            ui.add_space(5.0);
            ui.label(&frame.caption);
            table::draw_dataframe(ui, "explorer_table", &frame.preview, 320.0);

            ui.add_space(8.0);
            if ui.button("⬇ Download the data").clicked() {
                action = ViewAction::DownloadCsv;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.heading("Category Distribution");
        ui.label(RichText::new("You can see the most popular category here").size(15.0));
        ui.add_space(5.0);
        ui.label(RichText::new("Number of YouTubers in Each Category").strong());
        ChartPlotter::draw_category_distribution(ui, &derived.counts);

        action
    }
}
