//! HTTP access to the recording server.
//!
//! Native builds use a shared blocking `reqwest` client and are expected to
//! be called from a worker thread. Web builds go through the browser's
//! `fetch`, relative to the page origin by default.

use crate::error::BrowserError;
use crate::listing::{DeviceListing, parse_listing};

#[cfg(not(target_arch = "wasm32"))]
use {once_cell::sync::OnceCell, reqwest::blocking::Client};

/// Server used when nothing else is configured
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
/// Same origin as the page serving the app
#[cfg(target_arch = "wasm32")]
pub const DEFAULT_SERVER_URL: &str = "";

// Longest device name the server accepts
const MAX_DEVICE_NAME_LEN: usize = 32;

#[cfg(not(target_arch = "wasm32"))]
static HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> Result<&'static Client, BrowserError> {
    HTTP_CLIENT.get_or_try_init(|| {
        // Listing and downloads wait for the server as long as it takes.
        Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| BrowserError::Request {
                reason: format!("Failed to create HTTP client: {e}"),
            })
    })
}

/// Endpoint builder bound to one server base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerClient {
    base_url: String,
}

impl Default for ServerClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl ServerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self) -> String {
        format!("{}/files", self.base_url)
    }

    /// Retrieval URL for a recording; `filename` is used exactly as the server sent it
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}/file/{}", self.base_url, filename)
    }

    pub fn latest_url(&self) -> String {
        format!("{}/file/latest", self.base_url)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/file", self.base_url)
    }
}

/// Check a device name against the server's rule (1-32 of `[A-Za-z0-9-]`)
pub fn validate_device_name(name: &str) -> Result<(), BrowserError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_DEVICE_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(BrowserError::InvalidDeviceName {
            name: name.to_owned(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ServerClient {
    /// `GET /files` and decode the device listing
    pub fn fetch_listing(&self) -> Result<DeviceListing, BrowserError> {
        let url = self.listing_url();
        log::debug!("Fetching listing from {url}");

        let response = http_client()?.get(&url).send()?;
        if !response.status().is_success() {
            return Err(BrowserError::Status {
                code: response.status().as_u16(),
            });
        }

        let body = response.text()?;
        let listing = parse_listing(&body)?;
        log::info!(
            "Loaded {} devices with {} recordings",
            listing.len(),
            listing.total_files()
        );
        Ok(listing)
    }

    /// Download a recording body
    pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, BrowserError> {
        log::debug!("Downloading {url}");

        let response = http_client()?.get(url).send()?;
        if !response.status().is_success() {
            return Err(BrowserError::Status {
                code: response.status().as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    /// `POST /file` with the headers the server requires.
    ///
    /// Returns the filename the server stored the recording under.
    pub fn upload_recording(
        &self,
        device_name: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, BrowserError> {
        validate_device_name(device_name)?;

        let url = self.upload_url();
        log::info!(
            "Uploading {file_name} ({} bytes) as device {device_name}",
            data.len()
        );

        let response = http_client()?
            .post(&url)
            .header("Content-Type", "audio/wav")
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            )
            .header("X-Device-Name", device_name)
            .body(data)
            .send()?;

        if !response.status().is_success() {
            return Err(BrowserError::Status {
                code: response.status().as_u16(),
            });
        }

        let stored = response.text()?.trim().to_owned();
        log::info!("Server stored upload as {stored}");
        Ok(stored)
    }
}

#[cfg(target_arch = "wasm32")]
impl ServerClient {
    /// `GET /files` and decode the device listing
    pub async fn fetch_listing(&self) -> Result<DeviceListing, BrowserError> {
        let body = fetch_text(&self.listing_url()).await?;
        let listing = parse_listing(&body)?;
        log::info!(
            "Loaded {} devices with {} recordings",
            listing.len(),
            listing.total_files()
        );
        Ok(listing)
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, BrowserError> {
    use wasm_bindgen::JsCast as _;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let platform = |reason: &str| BrowserError::Platform {
        reason: reason.to_owned(),
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| platform("Failed to create request"))?;

    let window = web_sys::window().ok_or_else(|| platform("No window found"))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| BrowserError::Request {
            reason: format!("Failed to fetch {url}"),
        })?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| platform("Failed to convert response"))?;

    if !response.ok() {
        return Err(BrowserError::Status {
            code: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(|_| platform("Failed to get text"))?)
        .await
        .map_err(|_| BrowserError::Request {
            reason: "Failed to read response body".to_owned(),
        })?;

    text.as_string()
        .ok_or_else(|| platform("Response body was not a string"))
}
