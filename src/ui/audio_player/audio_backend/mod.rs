// Re-export the AudioBackend trait
mod trait_def;
pub use trait_def::AudioBackend;

// Platform-specific implementations
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeAudioBackend as PlatformAudioBackend;
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend as PlatformAudioBackend;

#[cfg(test)]
pub mod recording;
