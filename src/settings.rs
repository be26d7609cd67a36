use serde::{Deserialize, Serialize};

use crate::client::{DEFAULT_SERVER_URL, ServerClient};

/// User settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    /// Base URL of the recording server, empty for same origin
    pub server_url: String,
    /// Player volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            volume: 1.0,
        }
    }
}

impl Settings {
    /// Settings key inside eframe storage
    pub const STORAGE_KEY: &'static str = eframe::APP_KEY;

    pub fn server_client(&self) -> ServerClient {
        ServerClient::new(&self.server_url)
    }
}
