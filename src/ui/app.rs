//! Main application struct and eframe integration
//!
//! This module contains the ReadAloudApp that implements eframe::App.

use crate::ui::components::{ControlBar, DebugPanel, TextEditor, VoiceSliders};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align2, CentralPanel, RichText, TopBottomPanel};
use tracing::info;

/// Main ReadAloud application
pub struct ReadAloudApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
}

impl ReadAloudApp {
    /// Create a new ReadAloud application
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self { state, theme }
    }
}

/// Render the whole window and drive completion polling
///
/// While the controller is not idle a repaint is scheduled every poll
/// interval, so completion is noticed without user input.
pub fn show_main_window(ctx: &egui::Context, state: &mut AppState, theme: &Theme) {
    if state.poll() {
        ctx.request_repaint();
    }

    show_debug_area(ctx, state, theme);

    CentralPanel::default()
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
        .show(ctx, |ui| {
            TextEditor::new(state, theme).show(ui);
            ui.add_space(theme.spacing_sm);
            VoiceSliders::new(state, theme).show(ui);
            ui.add_space(theme.spacing_sm);
            ControlBar::new(state, theme).show(ui);
        });

    show_notice(ctx, state, theme);

    if !state.controller.is_idle() {
        ctx.request_repaint_after(state.poll_interval);
    }
}

fn show_debug_area(ctx: &egui::Context, state: &mut AppState, theme: &Theme) {
    TopBottomPanel::bottom("debug_area")
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing_sm))
        .show(ctx, |ui| {
            ui.toggle_value(&mut state.show_debug_panel, "🔍 Debug");
            if state.show_debug_panel {
                DebugPanel::new(state, theme).show(ui);
            }
        });
}

fn show_notice(ctx: &egui::Context, state: &mut AppState, theme: &Theme) {
    let Some(notice) = state.notice.clone() else {
        return;
    };

    let color = if notice.title == "Warning" {
        theme.warning
    } else {
        theme.error
    };

    let mut dismissed = false;
    egui::Window::new(RichText::new(&notice.title).color(color))
        .id(egui::Id::new("error_notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&notice.message).color(theme.text_primary));
            if notice.detail != notice.message {
                ui.label(RichText::new(&notice.detail).size(11.0).color(theme.text_muted));
            }
            ui.add_space(theme.spacing_sm);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        state.dismiss_notice();
    }
}

impl eframe::App for ReadAloudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        show_main_window(ctx, &mut self.state, &self.theme);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("ReadAloud shutting down");
        self.state.stop();
    }
}
