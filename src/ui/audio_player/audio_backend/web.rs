use web_sys::HtmlAudioElement;

use crate::ui::audio_player::audio_backend::trait_def::AudioBackend;

/// Web audio backend driving a detached `<audio>` element.
///
/// The browser streams and decodes the source itself; changing `src`
/// interrupts whatever was playing.
pub struct WebAudioBackend {
    /// The one audio element of the page
    audio: Option<HtmlAudioElement>,
    /// Current volume
    volume: f32,
    /// Whether backend initialization succeeded
    initialized: bool,
}

impl WebAudioBackend {
    /// Create a new web audio backend
    pub fn new() -> Self {
        Self {
            audio: None,
            volume: 1.0,
            initialized: false,
        }
    }

    fn element(&self) -> Result<&HtmlAudioElement, String> {
        self.audio
            .as_ref()
            .ok_or_else(|| "Audio element not available".to_owned())
    }

    /// Start playback; the returned promise rejects on autoplay or decode errors
    fn start(audio: &HtmlAudioElement) -> Result<(), String> {
        let promise = audio
            .play()
            .map_err(|e| format!("Failed to start audio playback: {e:?}"))?;

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::error!("Audio playback was rejected: {e:?}");
            }
        });
        Ok(())
    }
}

impl AudioBackend for WebAudioBackend {
    fn init(&mut self) -> Result<(), String> {
        match HtmlAudioElement::new() {
            Ok(audio) => {
                audio.set_volume(f64::from(self.volume));
                self.audio = Some(audio);
                self.initialized = true;
                Ok(())
            }
            Err(_) => {
                self.initialized = false;
                Err("Failed to create audio element".to_owned())
            }
        }
    }

    fn play_url(&mut self, url: &str) -> Result<(), String> {
        let audio = self.element()?;
        audio.set_src(url);
        Self::start(audio)
    }

    fn pause(&mut self) -> Result<(), String> {
        self.element()?
            .pause()
            .map_err(|e| format!("Failed to pause audio: {e:?}"))
    }

    fn resume(&mut self) -> Result<(), String> {
        let audio = self.element()?;
        if audio.src().is_empty() {
            return Err("No audio loaded".to_owned());
        }
        Self::start(audio)
    }

    fn stop(&mut self) -> Result<(), String> {
        let audio = self.element()?;
        audio
            .pause()
            .map_err(|e| format!("Failed to stop audio: {e:?}"))?;
        audio.set_current_time(0.0);
        Ok(())
    }

    fn set_position(&mut self, position_secs: f32) -> Result<(), String> {
        self.element()?.set_current_time(f64::from(position_secs));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), String> {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(audio) = &self.audio {
            audio.set_volume(f64::from(self.volume));
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.audio
            .as_ref()
            .is_some_and(|a| !a.paused() && !a.ended())
    }

    fn is_loading(&self) -> bool {
        // HAVE_FUTURE_DATA is 3
        self.audio
            .as_ref()
            .is_some_and(|a| !a.src().is_empty() && !a.paused() && a.ready_state() < 3)
    }

    fn get_position(&self) -> f32 {
        self.audio
            .as_ref()
            .map(|a| a.current_time() as f32)
            .unwrap_or(0.0)
    }

    fn get_duration(&self) -> f32 {
        match &self.audio {
            Some(a) if a.duration().is_finite() => a.duration() as f32,
            _ => 0.0,
        }
    }

    fn is_available(&self) -> bool {
        self.initialized
    }
}

impl Default for WebAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WebAudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAudioBackend")
            .field("initialized", &self.initialized)
            .field("volume", &self.volume)
            .field("src", &self.audio.as_ref().map(|a| a.src()))
            .finish()
    }
}
