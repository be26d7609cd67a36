use std::io::Cursor;
use std::time::Instant;

use kira::{
    AudioManager,
    AudioManagerSettings,
    Decibels,
    DefaultBackend,
    Tween,
    sound::FromFileError,
    sound::streaming::{StreamingSoundData, StreamingSoundHandle},
};

use crate::background::Pending;
use crate::client::ServerClient;
use crate::ui::audio_player::audio_backend::trait_def::AudioBackend;

/// Native audio backend implementation using kira.
///
/// Recordings are downloaded on a worker thread; playback starts from
/// `poll` once the bytes are in.
pub struct NativeAudioBackend {
    /// Audio manager for playback
    manager: Option<AudioManager<DefaultBackend>>,
    /// Handle to the currently playing sound
    sound_handle: Option<StreamingSoundHandle<FromFileError>>,
    /// Download of the requested source
    download: Pending<Result<Vec<u8>, String>>,
    /// Current position in seconds
    current_position: f32,
    /// Start time of playback for position tracking
    playback_start_time: Option<Instant>,
    /// Position when playback started
    playback_start_position: f32,
    /// Audio duration in seconds
    duration: f32,
    /// Whether audio is currently loaded
    audio_loaded: bool,
    /// Is currently playing
    is_playing: bool,
    /// Whether backend initialization succeeded
    initialized: bool,
    /// Current volume level (0.0 - 1.0)
    volume: f32,
}

impl NativeAudioBackend {
    /// Create a new native audio backend
    pub fn new() -> Self {
        Self {
            manager: None,
            sound_handle: None,
            download: Pending::new(),
            current_position: 0.0,
            playback_start_time: None,
            playback_start_position: 0.0,
            duration: 0.0,
            audio_loaded: false,
            is_playing: false,
            initialized: false,
            volume: 1.0,
        }
    }

    fn volume_to_decibels(volume: f32) -> Decibels {
        let clamped = volume.clamp(0.0, 1.0);
        if clamped <= 0.0 {
            Decibels(-80.0)
        } else {
            Decibels(20.0 * clamped.log10())
        }
    }

    fn reset_position(&mut self) {
        self.current_position = 0.0;
        self.playback_start_position = 0.0;
        self.playback_start_time = None;
        self.is_playing = false;
    }

    fn start_playback(&mut self, data: Vec<u8>) -> Result<(), String> {
        let manager = self
            .manager
            .as_mut()
            .ok_or_else(|| "Audio manager not available".to_owned())?;

        let duration = wav_duration_secs(&data);
        let byte_len = data.len();

        let sound_data = StreamingSoundData::from_cursor(Cursor::new(data))
            .map_err(|e| format!("Failed to decode audio: {e}"))?;

        let mut handle = manager
            .play(sound_data)
            .map_err(|e| format!("Failed to start audio playback: {e}"))?;
        handle.set_volume(Self::volume_to_decibels(self.volume), Tween::default());

        log::info!("Playing {byte_len} bytes ({duration:.1}s)");

        self.sound_handle = Some(handle);
        self.duration = duration;
        self.current_position = 0.0;
        self.playback_start_time = Some(Instant::now());
        self.playback_start_position = 0.0;
        self.audio_loaded = true;
        self.is_playing = true;
        Ok(())
    }
}

/// Duration of a WAV payload, 0.0 when the header cannot be read
fn wav_duration_secs(data: &[u8]) -> f32 {
    match hound::WavReader::new(Cursor::new(data)) {
        Ok(reader) => {
            let sample_rate = reader.spec().sample_rate;
            if sample_rate == 0 {
                0.0
            } else {
                reader.duration() as f32 / sample_rate as f32
            }
        }
        Err(e) => {
            log::debug!("Could not read WAV header for duration: {e}");
            0.0
        }
    }
}

impl AudioBackend for NativeAudioBackend {
    fn init(&mut self) -> Result<(), String> {
        match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => {
                self.manager = Some(manager);
                self.initialized = true;
                Ok(())
            }
            Err(e) => {
                self.initialized = false;
                Err(format!("Failed to initialize audio manager: {e}"))
            }
        }
    }

    fn play_url(&mut self, url: &str) -> Result<(), String> {
        if !self.initialized {
            return Err("Audio backend not initialized".to_owned());
        }

        // The new source interrupts whatever was playing.
        if let Some(mut handle) = self.sound_handle.take() {
            handle.stop(Tween::default());
        }
        self.reset_position();
        self.audio_loaded = false;
        self.duration = 0.0;

        let completer = self.download.start();
        let url = url.to_owned();
        std::thread::spawn(move || {
            completer.complete(ServerClient::fetch_bytes(&url).map_err(|e| e.to_string()));
        });

        Ok(())
    }

    fn poll(&mut self) -> Result<(), String> {
        match self.download.poll() {
            Some(Ok(data)) => self.start_playback(data),
            Some(Err(e)) => Err(format!("Failed to download audio: {e}")),
            None => Ok(()),
        }
    }

    fn pause(&mut self) -> Result<(), String> {
        if let Some(handle) = &mut self.sound_handle {
            if self.is_playing {
                if let Some(start_time) = self.playback_start_time {
                    let elapsed = start_time.elapsed().as_secs_f32();
                    self.current_position = self.playback_start_position + elapsed;
                }
            }

            handle.pause(Tween::default());
            self.is_playing = false;
            Ok(())
        } else {
            Err("No audio playing".to_owned())
        }
    }

    fn resume(&mut self) -> Result<(), String> {
        if let Some(handle) = &mut self.sound_handle {
            handle.set_volume(Self::volume_to_decibels(self.volume), Tween::default());
            handle.resume(Tween::default());

            self.playback_start_time = Some(Instant::now());
            self.playback_start_position = self.current_position;
            self.is_playing = true;
            Ok(())
        } else {
            Err("No audio loaded".to_owned())
        }
    }

    fn stop(&mut self) -> Result<(), String> {
        self.download.cancel();
        if let Some(mut handle) = self.sound_handle.take() {
            handle.stop(Tween::default());
        }
        self.reset_position();
        Ok(())
    }

    fn set_position(&mut self, position_secs: f32) -> Result<(), String> {
        if !self.audio_loaded {
            return Err("No audio loaded".to_owned());
        }

        let clamped_position = position_secs.clamp(0.0, self.duration);
        self.current_position = clamped_position;
        self.playback_start_position = clamped_position;

        if let Some(handle) = &mut self.sound_handle {
            handle.seek_to(f64::from(clamped_position));
            if self.is_playing {
                self.playback_start_time = Some(Instant::now());
            }
            Ok(())
        } else {
            Err("No audio handle available".to_owned())
        }
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), String> {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(handle) = &mut self.sound_handle {
            handle.set_volume(Self::volume_to_decibels(self.volume), Tween::default());
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        if !self.audio_loaded {
            return false;
        }

        if self.is_playing && self.duration > 0.0 {
            return self.get_position() < self.duration;
        }

        self.is_playing
    }

    fn is_loading(&self) -> bool {
        self.download.is_active()
    }

    fn get_position(&self) -> f32 {
        if !self.is_playing {
            return self.current_position;
        }

        if let Some(start_time) = self.playback_start_time {
            let position = self.playback_start_position + start_time.elapsed().as_secs_f32();
            if self.duration > 0.0 {
                position.min(self.duration)
            } else {
                position
            }
        } else {
            self.current_position
        }
    }

    fn get_duration(&self) -> f32 {
        self.duration
    }

    fn is_available(&self) -> bool {
        self.initialized
    }
}

impl Default for NativeAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NativeAudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeAudioBackend")
            .field("duration", &self.duration)
            .field("audio_loaded", &self.audio_loaded)
            .field("loading", &self.download.is_active())
            .field("initialized", &self.initialized)
            .field("volume", &self.volume)
            .field("manager", &self.manager.as_ref().map(|_| "<audio manager>"))
            .field("sound_handle", &self.sound_handle.as_ref().map(|_| "<sound handle>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{NativeAudioBackend, wav_duration_secs};
    use crate::ui::audio_player::audio_backend::AudioBackend as _;

    /// PCM16 mono 8 kHz WAV holding `samples` silent samples
    fn wav_bytes(samples: u32) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..samples {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn reads_duration_from_wav_header() {
        let secs = wav_duration_secs(&wav_bytes(16_000));
        assert!((secs - 2.0).abs() < 1e-3, "got {secs}");
    }

    #[test]
    fn unreadable_payload_has_zero_duration() {
        assert_eq!(wav_duration_secs(b"not a wav"), 0.0);
    }

    #[test]
    fn uninitialized_backend_refuses_to_play() {
        let mut backend = NativeAudioBackend::new();
        assert!(!backend.is_available());
        assert!(backend.play_url("http://127.0.0.1:9/file/a.wav").is_err());
        assert!(!backend.is_loading());
        assert!(!backend.is_playing());
    }

    #[test]
    fn stop_without_audio_is_harmless() {
        let mut backend = NativeAudioBackend::new();
        assert!(backend.stop().is_ok());
        assert!(backend.set_position(1.0).is_err());
        assert_eq!(backend.get_position(), 0.0);
    }
}
