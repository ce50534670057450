//! Speed, pitch and volume sliders

use crate::config::{PITCH_RANGE, SPEED_RANGE, VOLUME_RANGE};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};
use std::ops::RangeInclusive;

pub struct VoiceSliders<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> VoiceSliders<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let voice = &mut self.state.voice;

        egui::Grid::new("voice_sliders")
            .num_columns(2)
            .spacing([theme.spacing, theme.spacing_sm])
            .show(ui, |ui| {
                slider_row(ui, theme, "Speed", &mut voice.speed, SPEED_RANGE);
                slider_row(ui, theme, "Pitch", &mut voice.pitch, PITCH_RANGE);
                slider_row(ui, theme, "Volume", &mut voice.volume, VOLUME_RANGE);
            });
    }
}

fn slider_row(
    ui: &mut egui::Ui,
    theme: &Theme,
    name: &str,
    value: &mut u32,
    range: RangeInclusive<u32>,
) {
    ui.label(RichText::new(format!("{}: {}", name, value)).color(theme.text_secondary));

    let response = ui.add(
        egui::Slider::new(value, range)
            .show_value(false)
            .trailing_fill(true),
    );
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Slider, true, name));
    ui.end_row();
}
