//! UI Components for ReadAloud

mod control_bar;
mod debug_panel;
mod text_editor;
mod voice_sliders;

pub use control_bar::ControlBar;
pub use debug_panel::DebugPanel;
pub use text_editor::TextEditor;
pub use voice_sliders::VoiceSliders;
