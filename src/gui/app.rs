//! Channel Insight Main Application
//! Main window with the navigation panel and the explorer/analysis views.

use crate::charts::{RenderError, StaticChartRenderer, DEFAULT_SIZE};
use crate::config::DashboardConfig;
use crate::data::{ChannelTable, DataCache, DataProcessor, DerivedCache};
use crate::gui::control_panel::{DashboardError, MenuChoice, ERROR_COLOR};
use crate::gui::{AnalysisView, ControlPanel, ControlPanelAction, ExplorerView};
use egui::{RichText, SidePanel};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const APP_TITLE: &str = "The Youtube Channels Analysis 🎬";

/// Actions triggered from inside a view, handled after the frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    None,
    DownloadCsv,
    SaveRankingPng,
    SaveScatterPng,
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    cache: DataCache,
    /// Load outcome; a failure is kept and shown instead of the views.
    table: Result<Arc<ChannelTable>, String>,
    derived: DerivedCache,
    control_panel: ControlPanel,
    explorer: ExplorerView,
    analysis: AnalysisView,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut cache = DataCache::new(config.data_path.clone());
        let mut control_panel = ControlPanel::new();
        control_panel.data_source = cache.path().display().to_string();

        let table = match cache.get_or_load() {
            Ok(table) => {
                control_panel.row_count = Some(table.height());
                control_panel.set_status(&format!("Loaded {} channels", table.height()));
                Ok(table)
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", cache.path().display(), e);
                control_panel.set_status(&format!("Error: {}", e));
                Err(e.to_string())
            }
        };

        Self {
            derived: DerivedCache::new(config.category_limit),
            config,
            cache,
            table,
            control_panel,
            explorer: ExplorerView::new(),
            analysis: AnalysisView::new(),
        }
    }

    fn show_load_error(ui: &mut egui::Ui, path: &Path, error: &str) {
        ui.add_space(20.0);
        ui.label(
            RichText::new("Failed to load the channel data")
                .size(18.0)
                .strong()
                .color(ERROR_COLOR),
        );
        ui.label(RichText::new(error).color(ERROR_COLOR));
        ui.label(format!("Expected a CSV at {}", path.display()));
    }

    fn handle_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::None => {}
            ViewAction::DownloadCsv => self.handle_download_csv(),
            ViewAction::SaveRankingPng => self.handle_save_ranking_png(),
            ViewAction::SaveScatterPng => self.handle_save_scatter_png(),
        }
    }

    /// Handle CSV download of the explorer's filtered rows
    fn handle_download_csv(&mut self) {
        let Some(filtered) = self.explorer.filtered_data() else {
            self.control_panel.set_status("Nothing to download");
            return;
        };

        let export_name = &self.config.export_file_name;
        let artifact = match DataProcessor::to_csv_artifact(filtered, export_name) {
            Ok(artifact) => artifact,
            Err(e) => {
                log::error!("Failed to serialize CSV: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        // Ask user for output location
        let path = match rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&artifact.file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let result = artifact
            .write_to(&path)
            .map_err(|source| DashboardError::Export {
                path: path.clone(),
                source,
            });
        match result {
            Ok(()) => {
                log::info!(
                    "Saved {} rows ({}) to {}",
                    artifact.rows,
                    artifact.mime,
                    path.display()
                );
                self.control_panel.set_status(&format!(
                    "Saved {} rows to {}",
                    artifact.rows,
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("{}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_save_ranking_png(&mut self) {
        let Some(frame) = self.analysis.frame() else {
            return;
        };
        let file_name = format!(
            "top_{}_{}.png",
            frame.top.len(),
            frame.metric.column_name().replace(' ', "_")
        );
        let Some(path) = Self::pick_png_path(&file_name) else {
            return;
        };

        let result =
            StaticChartRenderer::render_ranking_png(&path, &frame.top, frame.metric, DEFAULT_SIZE);
        self.report_render(result, &path);
    }

    fn handle_save_scatter_png(&mut self) {
        let Some(frame) = self.analysis.frame() else {
            return;
        };
        let Some(path) = Self::pick_png_path("subscribers_vs_video_views.png") else {
            return;
        };

        let result = StaticChartRenderer::render_scatter_png(&path, &frame.scatter, DEFAULT_SIZE);
        self.report_render(result, &path);
    }

    fn pick_png_path(file_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(file_name)
            .save_file()
    }

    fn report_render(&mut self, result: Result<(), RenderError>, path: &Path) {
        match result {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Saved chart to {}", path.display())),
            Err(e) => {
                log::error!("Failed to render {}: {}", path.display(), e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Navigation
        SidePanel::left("control_panel")
            .min_width(220.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                if self.control_panel.show(ui) == ControlPanelAction::MenuChanged {
                    log::debug!("Switched view to '{}'", self.control_panel.menu_label);
                }
            });

        let mut action = ViewAction::None;

        // Central panel - active view
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new(APP_TITLE).size(26.0).strong());
            ui.add_space(10.0);

            let table = match &self.table {
                Ok(table) => Arc::clone(table),
                Err(error) => {
                    Self::show_load_error(ui, self.cache.path(), error);
                    return;
                }
            };

            let derived = match self.derived.get_or_compute(&table) {
                Ok(derived) => derived,
                Err(e) => {
                    log::error!("Failed to aggregate data: {}", e);
                    ui.label(RichText::new(format!("Error: {}", e)).color(ERROR_COLOR));
                    return;
                }
            };

            let menu = self.control_panel.menu_label.clone();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match MenuChoice::from_label(&menu) {
                    Ok(MenuChoice::Explorer) => {
                        action = self.explorer.show(ui, &table, derived);
                    }
                    Ok(MenuChoice::Analysis) => {
                        action = self.analysis.show(ui, &table, derived, self.config.top_n);
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        ui.label(RichText::new("Error: Invalid selection").color(ERROR_COLOR));
                    }
                });
        });

        self.handle_action(action);
    }
}
