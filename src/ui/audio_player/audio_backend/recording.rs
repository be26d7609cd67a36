use std::cell::RefCell;
use std::rc::Rc;

use super::AudioBackend;

/// Backend that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Rc<RefCell<Vec<String>>>,
    src: Option<String>,
    playing: bool,
    volume: f32,
    offline: bool,
}

impl RecordingBackend {
    /// Backend plus a shared view of its call log
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let backend = Self::default();
        let calls = Rc::clone(&backend.calls);
        (backend, calls)
    }

    /// Backend whose audio output failed to initialize
    pub fn offline() -> (Self, Rc<RefCell<Vec<String>>>) {
        let (mut backend, calls) = Self::new();
        backend.offline = true;
        (backend, calls)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl AudioBackend for RecordingBackend {
    fn init(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn play_url(&mut self, url: &str) -> Result<(), String> {
        self.record(format!("play {url}"));
        self.src = Some(url.to_owned());
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), String> {
        self.record("pause".to_owned());
        self.playing = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), String> {
        self.record("resume".to_owned());
        if self.src.is_none() {
            return Err("No audio loaded".to_owned());
        }
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), String> {
        self.record("stop".to_owned());
        self.playing = false;
        Ok(())
    }

    fn set_position(&mut self, position_secs: f32) -> Result<(), String> {
        self.record(format!("seek {position_secs}"));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), String> {
        self.volume = volume;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn get_position(&self) -> f32 {
        0.0
    }

    fn get_duration(&self) -> f32 {
        if self.src.is_some() { 12.0 } else { 0.0 }
    }

    fn is_available(&self) -> bool {
        !self.offline
    }
}
