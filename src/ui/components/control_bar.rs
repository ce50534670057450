//! Playback control buttons
//!
//! Which buttons are enabled follows directly from the controller state.

use crate::speech::ControllerState;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// Speak / Pause / Resume / Stop / Clear buttons
pub struct ControlBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

#[derive(Clone, Copy)]
enum Control {
    Speak,
    Pause,
    Resume,
    Stop,
    Clear,
}

impl Control {
    const ALL: [Control; 5] = [
        Control::Speak,
        Control::Pause,
        Control::Resume,
        Control::Stop,
        Control::Clear,
    ];

    fn icon(self) -> &'static str {
        match self {
            Control::Speak => "💬",
            Control::Pause => "⏸",
            Control::Resume => "▶",
            Control::Stop => "⏹",
            Control::Clear => "🗑",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Control::Speak => "Speak",
            Control::Pause => "Pause",
            Control::Resume => "Resume",
            Control::Stop => "Stop",
            Control::Clear => "Clear",
        }
    }
}

impl<'a> ControlBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let count = Control::ALL.len() as f32;
        let spacing = ui.spacing().item_spacing.x;
        let width = ((ui.available_width() - spacing * (count - 1.0)) / count).max(60.0);

        let mut clicked = None;
        ui.horizontal(|ui| {
            for control in Control::ALL {
                if self.button(ui, control, width) {
                    clicked = Some(control);
                }
            }
        });

        match clicked {
            Some(Control::Speak) => self.state.speak_from_cursor(),
            Some(Control::Pause) => self.state.pause(),
            Some(Control::Resume) => self.state.resume(),
            Some(Control::Stop) => self.state.stop(),
            Some(Control::Clear) => self.state.clear(),
            None => {}
        }

        self.show_status(ui);
    }

    fn enabled(&self, control: Control) -> bool {
        match control {
            Control::Speak => self.state.can_speak(),
            Control::Pause => self.state.can_pause(),
            Control::Resume => self.state.can_resume(),
            Control::Stop | Control::Clear => true,
        }
    }

    fn button(&self, ui: &mut egui::Ui, control: Control, width: f32) -> bool {
        let enabled = self.enabled(control);
        let text = RichText::new(format!("{} {}", control.icon(), control.label()));

        let button = egui::Button::new(text)
            .min_size(Vec2::new(width, self.theme.control_height))
            .rounding(self.theme.button_rounding);

        let response = ui.add_enabled(enabled, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, control.label())
        });
        response.clicked()
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let (text, color) = match self.state.speech_state() {
            ControllerState::Idle => ("Idle", self.theme.text_muted),
            ControllerState::Speaking => ("Speaking", self.theme.success),
            ControllerState::Paused => ("Paused", self.theme.warning),
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new("Status:").size(12.0).color(self.theme.text_muted));
            let response = ui.label(RichText::new(text).size(12.0).color(color));
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, format!("Status: {}", text))
            });
        });
    }
}
