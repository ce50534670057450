//! Text editor component
//!
//! Multiline editor with a character counter. Pasted markup is stripped to
//! plain text before it reaches the document.

use crate::speech::normalize::{looks_like_markup, strip_markup};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::text::{CCursor, CCursorRange};
use egui::{self, RichText};

/// Editor for the text to be read aloud
pub struct TextEditor<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> TextEditor<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let editor_height = (ui.available_height() - 200.0).max(120.0);

        let has_focus = ui.memory(|m| m.has_focus(Self::id()));
        if has_focus {
            strip_pasted_markup(ui);
        }

        let output = egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .max_height(editor_height)
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut self.state.text)
                    .id(Self::id())
                    .hint_text("Paste text here. HTML will be removed automatically.")
                    .desired_width(f32::INFINITY)
                    .desired_rows(12)
                    .show(ui)
            })
            .inner;

        output.response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Text to read")
        });

        let mut edit_state = output.state;
        if self.state.cursor_reset_pending {
            edit_state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(0))));
            edit_state.store(ui.ctx(), output.response.id);
            self.state.cursor_reset_pending = false;
        } else if let Some(range) = edit_state.cursor.char_range() {
            self.state.cursor = range.primary.index;
        }

        ui.label(
            RichText::new(format!("Characters: {}", self.state.char_count()))
                .size(12.0)
                .color(self.theme.text_muted),
        );
    }

    fn id() -> egui::Id {
        egui::Id::new("readaloud_editor")
    }
}

/// Replace markup in this frame's paste events with its plain text
fn strip_pasted_markup(ui: &mut egui::Ui) {
    ui.input_mut(|input| {
        for event in input.events.iter_mut() {
            if let egui::Event::Paste(pasted) = event {
                if looks_like_markup(pasted) {
                    *pasted = strip_markup(pasted);
                }
            }
        }
    });
}
