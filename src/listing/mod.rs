//! Recording listing returned by the server's `/files` endpoint.
//!
//! The server groups recordings by device name. Device order matters for
//! display, so the listing keeps the key order of the JSON object instead of
//! collecting it into a hash map.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// One recording as described by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileEntry {
    /// Opaque retrieval name, appended verbatim to `/file/`
    pub filename: String,
    /// Display string chosen by the server
    pub human_timestamp: String,
    /// Sortable timestamp, only sent by newer servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_timestamp: Option<String>,
}

impl FileEntry {
    pub fn new(filename: impl Into<String>, human_timestamp: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            human_timestamp: human_timestamp.into(),
            machine_timestamp: None,
        }
    }
}

/// All recordings of one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroup {
    pub device: String,
    pub files: Vec<FileEntry>,
}

/// Device name to recordings, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceListing {
    groups: Vec<DeviceGroup>,
}

impl DeviceListing {
    pub fn from_groups(groups: Vec<DeviceGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[DeviceGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<DeviceGroup> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceGroup> {
        self.groups.iter()
    }

    /// Number of recordings across every device
    pub fn total_files(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }
}

impl<'a> IntoIterator for &'a DeviceListing {
    type Item = &'a DeviceGroup;
    type IntoIter = std::slice::Iter<'a, DeviceGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for DeviceListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListingVisitor;

        impl<'de> Visitor<'de> for ListingVisitor {
            type Value = DeviceListing;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping device names to lists of files")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                // Duplicate keys stay separate groups, in the order they appear.
                while let Some((device, files)) = map.next_entry::<String, Vec<FileEntry>>()? {
                    groups.push(DeviceGroup { device, files });
                }
                Ok(DeviceListing { groups })
            }
        }

        deserializer.deserialize_map(ListingVisitor)
    }
}

/// Body of `GET /files`
#[derive(Debug, Deserialize)]
struct ListingResponse {
    devices: DeviceListing,
}

/// Decode a `/files` response body.
///
/// The whole body is validated before anything is returned, so a malformed
/// entry anywhere rejects the listing instead of yielding part of it.
pub fn parse_listing(body: &str) -> Result<DeviceListing, BrowserError> {
    let response: ListingResponse = serde_json::from_str(body)?;
    Ok(response.devices)
}

#[cfg(test)]
mod tests;
