// Audio player module components
mod audio_player_component;
mod audio_controls;
mod audio_state;
mod audio_backend;

pub use audio_player_component::AudioPlayer;

#[cfg(test)]
pub(crate) use audio_backend::recording::RecordingBackend;
