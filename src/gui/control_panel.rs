//! Control Panel Widget
//! Left side navigation panel with the view menu, data source and status line.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;
use thiserror::Error;

pub const SIDEBAR_TITLE: &str = "Navigation";
pub const MENU_MSG: &str = "Choose your action";
pub const MENU_CHOICES: [&str; 2] = ["Data explorer", "Data analysis"];

pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid menu selection: '{0}'")]
    InvalidMenuSelection(String),
    #[error("Failed to write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The two dashboard views reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Explorer,
    Analysis,
}

impl MenuChoice {
    pub fn from_label(label: &str) -> Result<Self, DashboardError> {
        match label {
            "Data explorer" => Ok(MenuChoice::Explorer),
            "Data analysis" => Ok(MenuChoice::Analysis),
            other => Err(DashboardError::InvalidMenuSelection(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Explorer => MENU_CHOICES[0],
            MenuChoice::Analysis => MENU_CHOICES[1],
        }
    }
}

/// Left side panel with view navigation.
pub struct ControlPanel {
    /// Raw menu value; parsed by the app on every frame.
    pub menu_label: String,
    pub data_source: String,
    pub row_count: Option<usize>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            menu_label: MenuChoice::Explorer.label().to_string(),
            data_source: String::new(),
            row_count: None,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new(SIDEBAR_TITLE)
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== View Menu =====
        ui.label(RichText::new(MENU_MSG).size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("menu")
            .width(200.0)
            .selected_text(&self.menu_label)
            .show_ui(ui, |ui| {
                for choice in MENU_CHOICES {
                    if ui
                        .selectable_label(self.menu_label == choice, choice)
                        .clicked()
                        && self.menu_label != choice
                    {
                        self.menu_label = choice.to_string();
                        action = ControlPanelAction::MenuChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.data_source).size(12.0));
                if let Some(rows) = self.row_count {
                    ui.label(
                        RichText::new(format!("{} channels loaded", rows))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.starts_with("Error") {
            ERROR_COLOR
        } else if self.status.starts_with("Saved") {
            SUCCESS_COLOR
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    MenuChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels_round_trip() {
        for label in MENU_CHOICES {
            let choice = MenuChoice::from_label(label).unwrap();
            assert_eq!(choice.label(), label);
        }
    }

    #[test]
    fn unknown_menu_value_is_an_error() {
        let err = MenuChoice::from_label("Data mining").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidMenuSelection(ref v) if v == "Data mining"));
    }

    #[test]
    fn panel_starts_on_the_explorer() {
        let panel = ControlPanel::new();
        assert_eq!(
            MenuChoice::from_label(&panel.menu_label).unwrap(),
            MenuChoice::Explorer
        );
    }
}
