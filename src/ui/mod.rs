// UI component modules
mod top_panel;
mod file_browser;
mod audio_player;
#[cfg(not(target_arch = "wasm32"))]
mod upload_panel;

pub use top_panel::{TopPanel, TopPanelAction};
pub use file_browser::FileBrowserView;
pub use audio_player::AudioPlayer;
#[cfg(not(target_arch = "wasm32"))]
pub use upload_panel::UploadPanel;

#[cfg(test)]
pub(crate) use audio_player::RecordingBackend;
