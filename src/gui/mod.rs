//! GUI module - User interface components

mod analysis;
mod app;
mod control_panel;
mod explorer;
mod table;

pub use analysis::AnalysisView;
pub use app::{DashboardApp, APP_TITLE};
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use explorer::ExplorerView;
