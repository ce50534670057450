//! Debug panel component
//!
//! Displays controller state and the recent event log.

use crate::speech::{ControllerState, StopReason};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// Debug panel component
pub struct DebugPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> DebugPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                egui::Grid::new("debug_stats")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        self.stat_row(ui, "Program", &self.state.controller.engine().program);
                        self.stat_row(ui, "State", self.controller_status());
                        self.stat_row(ui, "Last stop", self.stop_reason());
                        self.stat_row(ui, "Cursor", &self.state.cursor.to_string());
                        self.stat_row(ui, "Utterances", &self.state.debug_info.utterances.to_string());
                        if let Some(pid) = self.state.controller.process_id() {
                            self.stat_row(ui, "Pid", &pid.to_string());
                        }
                        if let Some(text) = self.state.controller.current_text() {
                            self.stat_row(ui, "Speaking", &format!("{} chars", text.chars().count()));
                        }
                    });

                ui.separator();

                ScrollArea::vertical()
                    .id_salt("debug_log")
                    .max_height(100.0)
                    .auto_shrink([false, true])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for msg in &self.state.debug_info.log_messages {
                            ui.label(
                                RichText::new(msg)
                                    .size(11.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.theme.text_muted),
                            );
                        }

                        if self.state.debug_info.log_messages.is_empty() {
                            ui.label(
                                RichText::new("No log messages")
                                    .size(11.0)
                                    .color(self.theme.text_muted)
                                    .italics(),
                            );
                        }
                    });
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(RichText::new(label).size(12.0).color(self.theme.text_muted));
        ui.label(
            RichText::new(value)
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_primary),
        );
        ui.end_row();
    }

    fn controller_status(&self) -> &'static str {
        match self.state.speech_state() {
            ControllerState::Idle => "Idle",
            ControllerState::Speaking => "Speaking",
            ControllerState::Paused => "Paused",
        }
    }

    fn stop_reason(&self) -> &'static str {
        match self.state.controller.last_stop_reason() {
            None => "-",
            Some(StopReason::Finished) => "finished",
            Some(StopReason::Stopped) => "stopped",
        }
    }
}
