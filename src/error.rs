use std::fmt;

/// Errors raised while talking to the recording server
#[derive(Debug)]
pub enum BrowserError {
    /// The request could not be sent or the body could not be read
    Request { reason: String },
    /// The server answered with a non-success status
    Status { code: u16 },
    /// The listing body was not the expected JSON shape
    Decode(serde_json::Error),
    /// Device name rejected before upload
    InvalidDeviceName { name: String },
    /// IO error
    Io(std::io::Error),
    /// Host platform refused the operation (no window, fetch rejected, ...)
    Platform { reason: String },
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { reason } => write!(f, "Request failed: {reason}"),
            Self::Status { code } => write!(f, "Server returned error status: {code}"),
            Self::Decode(err) => write!(f, "Failed to parse listing: {err}"),
            Self::InvalidDeviceName { name } => write!(
                f,
                "Invalid device name {name:?}: use 1-32 letters, digits or '-'"
            ),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Platform { reason } => write!(f, "Platform error: {reason}"),
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

impl From<std::io::Error> for BrowserError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status {
                code: status.as_u16(),
            },
            None => Self::Request {
                reason: err.to_string(),
            },
        }
    }
}
