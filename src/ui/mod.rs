//! GUI implementation with egui/eframe
//!
//! This module provides the desktop user interface for ReadAloud using the eframe framework.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::{show_main_window, ReadAloudApp};
pub use state::{AppState, DebugInfo, ErrorNotice};
pub use theme::Theme;

/// Run the ReadAloud application
pub fn run(state: AppState) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 600.0])
            .with_min_inner_size([420.0, 400.0])
            .with_title("Text to Speech"),
        ..Default::default()
    };

    eframe::run_native(
        "ReadAloud",
        options,
        Box::new(|cc| Ok(Box::new(ReadAloudApp::new(cc, state)))),
    )
}
