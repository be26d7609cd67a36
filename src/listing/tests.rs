use super::{DeviceGroup, DeviceListing, FileEntry, parse_listing};
use crate::error::BrowserError;

fn devices(listing: &DeviceListing) -> Vec<&str> {
    listing.iter().map(|g| g.device.as_str()).collect()
}

#[test]
fn parses_two_devices_in_server_order() {
    let body = r#"{"devices": {"DeviceA": [{"filename":"a.wav","human_timestamp":"Jan 1, 10:00"}], "DeviceB": []}}"#;
    let listing = parse_listing(body).unwrap();

    assert_eq!(devices(&listing), vec!["DeviceA", "DeviceB"]);
    assert_eq!(listing.groups()[0].files, vec![FileEntry::new("a.wav", "Jan 1, 10:00")]);
    assert!(listing.groups()[1].files.is_empty());
    assert_eq!(listing.total_files(), 1);
}

#[test]
fn keeps_unsorted_key_order() {
    let body = r#"{"devices": {"zeta": [], "alpha": [], "mike": []}}"#;
    let listing = parse_listing(body).unwrap();
    assert_eq!(devices(&listing), vec!["zeta", "alpha", "mike"]);
}

#[test]
fn duplicate_device_keys_become_separate_groups() {
    let body = r#"{"devices": {"dup": [{"filename":"1.wav","human_timestamp":"one"}], "dup": []}}"#;
    let listing = parse_listing(body).unwrap();
    assert_eq!(devices(&listing), vec!["dup", "dup"]);
    assert_eq!(listing.groups()[0].files.len(), 1);
}

#[test]
fn empty_devices_object_is_empty_listing() {
    let listing = parse_listing(r#"{"devices": {}}"#).unwrap();
    assert!(listing.is_empty());
    assert_eq!(listing, DeviceListing::default());
}

#[test]
fn reads_machine_timestamp_from_server() {
    let body = r#"{"devices": {"mic1": [{
        "machine_timestamp": "20250301_101500",
        "human_timestamp": "2025-03-01 10:15:00",
        "filename": "mic1_20250301_101500.wav"
    }]}}"#;
    let listing = parse_listing(body).unwrap();
    let entry = &listing.groups()[0].files[0];
    assert_eq!(entry.machine_timestamp.as_deref(), Some("20250301_101500"));
    assert_eq!(entry.human_timestamp, "2025-03-01 10:15:00");
}

#[test]
fn missing_devices_key_is_rejected() {
    let err = parse_listing(r#"{"files": {}}"#).unwrap_err();
    assert!(matches!(err, BrowserError::Decode(_)));
    assert!(err.to_string().contains("devices"));
}

#[test]
fn non_json_body_is_rejected() {
    let err = parse_listing("<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, BrowserError::Decode(_)));
}

#[test]
fn non_array_file_list_rejects_whole_listing() {
    let body = r#"{"devices": {"ok": [], "broken": "nope", "later": []}}"#;
    assert!(parse_listing(body).is_err());
}

#[test]
fn entry_without_display_timestamp_is_rejected() {
    let body = r#"{"devices": {"mic": [{"filename":"a.wav"}]}}"#;
    assert!(parse_listing(body).is_err());
}

#[test]
fn into_groups_hands_back_owned_groups() {
    let listing = DeviceListing::from_groups(vec![DeviceGroup {
        device: "kitchen".to_owned(),
        files: vec![FileEntry::new("k.wav", "now")],
    }]);
    let groups = listing.into_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].device, "kitchen");
}
