use super::audio_backend::{AudioBackend, PlatformAudioBackend};

/// What the shared player was last asked to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    /// URL handed to the backend
    pub url: String,
    /// Text shown in the player bar
    pub label: String,
}

/// Audio player state
pub struct AudioState {
    /// Source currently loaded (if any)
    pub current_source: Option<AudioSource>,

    /// Is the audio currently playing
    pub is_playing: bool,

    /// Source requested, waiting for data
    pub is_loading: bool,

    /// Current playback position in seconds
    pub current_position: f32,

    /// Total duration in seconds
    pub total_duration: f32,

    /// Current volume (0.0 - 1.0)
    pub volume: f32,

    /// Audio backend for playback
    audio_backend: Option<Box<dyn AudioBackend>>,
}

// Manual Debug implementation since dyn AudioBackend doesn't implement Debug
impl std::fmt::Debug for AudioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioState")
            .field("current_source", &self.current_source)
            .field("is_playing", &self.is_playing)
            .field("is_loading", &self.is_loading)
            .field("current_position", &self.current_position)
            .field("total_duration", &self.total_duration)
            .field("volume", &self.volume)
            .field("audio_backend", &self.audio_backend)
            .finish()
    }
}

impl Default for AudioState {
    fn default() -> Self {
        let mut backend = PlatformAudioBackend::new();
        match backend.init() {
            Ok(()) => log::info!("Audio backend initialized successfully"),
            Err(e) => log::error!("Failed to initialize audio backend: {e}"),
        }
        Self::with_backend(Box::new(backend))
    }
}

impl AudioState {
    /// Create a new audio state with the platform backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state around an already initialized backend
    pub fn with_backend(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            current_source: None,
            is_playing: false,
            is_loading: false,
            current_position: 0.0,
            total_duration: 0.0,
            volume: 1.0,
            audio_backend: Some(backend),
        }
    }

    /// Make `url` the current source and start it, interrupting the previous one
    pub fn play_url(&mut self, url: String, label: String) {
        log::info!("Playing {url}");

        self.current_position = 0.0;
        self.total_duration = 0.0;
        self.is_playing = false;
        self.is_loading = false;
        self.current_source = Some(AudioSource {
            url: url.clone(),
            label,
        });

        let Some(backend) = &mut self.audio_backend else {
            log::error!("No audio backend available to play {url}");
            return;
        };
        if !backend.is_available() {
            log::error!("Audio output unavailable, cannot play {url}");
            return;
        }

        if let Err(e) = backend.set_volume(self.volume) {
            log::error!("Failed to apply volume: {e}");
        }

        match backend.play_url(&url) {
            Ok(()) => {
                self.is_loading = backend.is_loading();
                self.is_playing = backend.is_playing() || self.is_loading;
            }
            Err(e) => log::error!("Failed to play audio: {e}"),
        }
    }

    /// Play or pause the current source
    pub fn toggle_play(&mut self) {
        let Some(backend) = &mut self.audio_backend else {
            return;
        };
        if self.current_source.is_none() {
            return;
        }

        let result = if self.is_playing {
            backend.pause()
        } else {
            backend.resume()
        };

        match result {
            Ok(()) => self.is_playing = !self.is_playing,
            Err(e) => log::debug!("Play/pause ignored: {e}"),
        }
    }

    /// Stop the audio playback
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.is_loading = false;
        self.current_position = 0.0;

        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.stop() {
                log::error!("Failed to stop audio: {e}");
            }
        }
    }

    /// Set the current position in seconds
    pub fn set_position(&mut self, position: f32) {
        self.current_position = position.clamp(0.0, self.total_duration.max(0.0));

        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.set_position(self.current_position) {
                log::error!("Failed to set audio position: {e}");
            }
        }
    }

    /// Set the volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);

        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.set_volume(self.volume) {
                log::error!("Failed to set audio volume: {e}");
            }
        }
    }

    /// Update playback state from backend
    pub fn update_from_backend(&mut self) {
        let Some(backend) = &mut self.audio_backend else {
            return;
        };

        if let Err(e) = backend.poll() {
            log::error!("{e}");
            self.is_playing = false;
            self.is_loading = false;
            self.current_position = 0.0;
            return;
        }

        self.is_loading = backend.is_loading();
        self.is_playing = backend.is_playing() || self.is_loading;
        self.current_position = backend.get_position();
        self.total_duration = backend.get_duration();
    }

    /// Get formatted current position (MM:SS)
    pub fn format_position(&self) -> String {
        format_clock(self.current_position)
    }

    /// Get formatted total duration (MM:SS)
    pub fn format_duration(&self) -> String {
        format_clock(self.total_duration)
    }

    /// Get playback progress as a ratio (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.total_duration > 0.0 {
            (self.current_position / self.total_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn format_clock(secs: f32) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u32;
    let seconds = (secs % 60.0).floor() as u32;
    format!("{minutes:02}:{seconds:02}")
}
