use egui::{Context, Frame, Ui};

use super::audio_backend::AudioBackend;
use super::audio_controls::AudioControls;
use super::audio_state::AudioState;

/// The one audio player shared by every list entry
#[derive(Debug)]
pub struct AudioPlayer {
    /// Audio player state
    audio_state: AudioState,
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer {
    /// Create a new audio player on the platform backend
    pub fn new() -> Self {
        Self {
            audio_state: AudioState::new(),
        }
    }

    pub fn with_backend(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            audio_state: AudioState::with_backend(backend),
        }
    }

    /// Show the audio player at the bottom of the screen
    pub fn show(&mut self, ctx: &Context) {
        self.audio_state.update_from_backend();

        egui::TopBottomPanel::bottom("audio_player_panel")
            .resizable(false)
            .frame(Frame::new().fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| {
                self.render(ui);
            });
    }

    /// Render the audio player UI
    pub fn render(&mut self, ui: &mut Ui) {
        Frame::new()
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                AudioControls::render(ui, &mut self.audio_state);
            });
    }

    /// Set the player's source to `url` and start playing it right away
    pub fn play_url(&mut self, url: String, label: impl Into<String>) {
        self.audio_state.play_url(url, label.into());
    }

    /// URL of the current source
    pub fn current_url(&self) -> Option<&str> {
        self.audio_state
            .current_source
            .as_ref()
            .map(|s| s.url.as_str())
    }

    pub fn is_playing(&self) -> bool {
        self.audio_state.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.audio_state.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio_state.set_volume(volume);
    }
}
