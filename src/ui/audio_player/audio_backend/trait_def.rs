/// Audio playback backend trait
/// Defines the interface for platform-specific audio playback implementations
pub trait AudioBackend: std::fmt::Debug {
    /// Initialize the audio backend
    fn init(&mut self) -> Result<(), String>;

    /// Replace the current source with `url` and start playing it.
    ///
    /// Backends may load asynchronously; playback then starts from `poll`.
    fn play_url(&mut self, url: &str) -> Result<(), String>;

    /// Finish any asynchronous work; called once per frame
    fn poll(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Pause audio playback
    fn pause(&mut self) -> Result<(), String>;

    /// Resume audio playback
    fn resume(&mut self) -> Result<(), String>;

    /// Stop audio playback
    fn stop(&mut self) -> Result<(), String>;

    /// Set the playback position in seconds
    fn set_position(&mut self, position_secs: f32) -> Result<(), String>;

    /// Set the volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32) -> Result<(), String>;

    /// Check if audio is currently playing
    fn is_playing(&self) -> bool;

    /// Source requested but not playing yet
    fn is_loading(&self) -> bool {
        false
    }

    /// Get the current playback position in seconds
    fn get_position(&self) -> f32;

    /// Get the duration of the current audio in seconds
    fn get_duration(&self) -> f32;

    /// Check if the backend is available (properly initialized)
    fn is_available(&self) -> bool;
}
