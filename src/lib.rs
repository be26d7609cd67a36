#![warn(clippy::all, rust_2018_idioms)]

//! Browse and play audio recordings that a server groups by device.

mod app;
mod background;
pub mod client;
pub mod error;
pub mod listing;
mod loader;
pub mod settings;
mod ui;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_support;

pub use app::DeviceAudioBrowserApp;
pub use client::ServerClient;
pub use error::BrowserError;
pub use listing::{DeviceGroup, DeviceListing, FileEntry, parse_listing};
pub use settings::Settings;
