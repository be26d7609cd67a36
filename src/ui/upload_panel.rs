use std::path::PathBuf;

use egui::{Color32, RichText, Ui};
use egui_phosphor::regular;

use crate::background::Pending;
use crate::client::{ServerClient, validate_device_name};
use crate::error::BrowserError;

/// Form that sends a local recording to the server as one device
#[derive(Default)]
pub struct UploadPanel {
    pub device_name: String,
    pub picked_file: Option<PathBuf>,
    status: Option<(String, bool)>,
    pending: Pending<Result<String, BrowserError>>,
}

impl UploadPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last status line and whether it reports an error
    pub fn status(&self) -> Option<(&str, bool)> {
        self.status.as_ref().map(|(msg, is_error)| (msg.as_str(), *is_error))
    }

    pub fn is_uploading(&self) -> bool {
        self.pending.is_active()
    }

    /// Validate the form and start the upload on a worker thread
    pub fn submit(&mut self, client: &ServerClient, ctx: &egui::Context) -> Result<(), BrowserError> {
        let device_name = self.device_name.trim().to_owned();
        validate_device_name(&device_name)?;

        let path = self.picked_file.clone().ok_or_else(|| BrowserError::Platform {
            reason: "No file selected".to_owned(),
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording.wav")
            .to_owned();

        let completer = self.pending.start();
        let client = client.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = std::fs::read(&path)
                .map_err(BrowserError::from)
                .and_then(|data| client.upload_recording(&device_name, &file_name, data));
            completer.complete(result);
            ctx.request_repaint();
        });

        self.status = Some((format!("Uploading {}...", self.file_label()), false));
        Ok(())
    }

    /// Collect a finished upload; true when the server stored a new recording
    pub fn poll(&mut self) -> bool {
        match self.pending.poll() {
            Some(Ok(stored)) => {
                self.status = Some((format!("Uploaded as {stored}"), false));
                self.picked_file = None;
                true
            }
            Some(Err(e)) => {
                log::error!("Upload failed: {e}");
                self.status = Some((e.to_string(), true));
                false
            }
            None => false,
        }
    }

    fn file_label(&self) -> String {
        self.picked_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "no file".to_owned())
    }

    /// Display the upload form, returning true once an upload has completed
    pub fn show(&mut self, ui: &mut Ui, client: &ServerClient) -> bool {
        let uploaded = self.poll();

        ui.add_space(8.0);
        ui.heading(format!("{} Upload", regular::UPLOAD_SIMPLE));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Device");
            ui.add(
                egui::TextEdit::singleline(&mut self.device_name)
                    .hint_text("kitchen-mic")
                    .desired_width(160.0),
            );
        });

        ui.horizontal(|ui| {
            if ui.button(format!("{} Choose WAV", regular::FOLDER_OPEN)).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select Recording")
                    .add_filter("WAV Audio", &["wav"])
                    .pick_file()
                {
                    self.picked_file = Some(path);
                }
            }
            ui.label(RichText::new(self.file_label()).weak());
        });

        ui.add_space(4.0);
        let can_submit = !self.is_uploading() && self.picked_file.is_some();
        if ui
            .add_enabled(can_submit, egui::Button::new(format!("{} Send", regular::PAPER_PLANE_RIGHT)))
            .clicked()
        {
            if let Err(e) = self.submit(client, ui.ctx()) {
                log::warn!("Upload rejected: {e}");
                self.status = Some((e.to_string(), true));
            }
        }

        if self.is_uploading() {
            ui.spinner();
        }

        if let Some((message, is_error)) = self.status() {
            let color = if is_error {
                Color32::from_rgb(255, 100, 100)
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(message).color(color));
        }

        uploaded
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use axum::http::StatusCode;

    use super::UploadPanel;
    use crate::client::ServerClient;
    use crate::error::BrowserError;
    use crate::test_support::TestServer;

    fn wait_until_done(panel: &mut UploadPanel) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if panel.poll() {
                return true;
            }
            if !panel.is_uploading() {
                return false;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn rejects_invalid_device_name_without_request() {
        let mut panel = UploadPanel::new();
        panel.device_name = "no spaces allowed".to_owned();
        panel.picked_file = Some("take.wav".into());

        let err = panel
            .submit(&ServerClient::new("http://127.0.0.1:9"), &egui::Context::default())
            .unwrap_err();

        assert!(matches!(err, BrowserError::InvalidDeviceName { .. }));
        assert!(!panel.is_uploading());
    }

    #[test]
    fn requires_a_picked_file() {
        let mut panel = UploadPanel::new();
        panel.device_name = "porch".to_owned();

        let err = panel
            .submit(&ServerClient::new("http://127.0.0.1:9"), &egui::Context::default())
            .unwrap_err();
        assert!(matches!(err, BrowserError::Platform { .. }));
    }

    #[test]
    fn uploads_file_and_reports_stored_name() {
        let path = std::env::temp_dir().join(format!(
            "device_audio_browser_upload_{}.wav",
            std::process::id()
        ));
        std::fs::write(&path, b"RIFFtest").unwrap();

        let server = TestServer::builder()
            .upload_reply(StatusCode::CREATED, "porch_20250101_120000.wav")
            .start();

        let mut panel = UploadPanel::new();
        panel.device_name = " porch ".to_owned();
        panel.picked_file = Some(path.clone());
        panel
            .submit(&ServerClient::new(server.base_url()), &egui::Context::default())
            .unwrap();

        assert!(wait_until_done(&mut panel), "upload did not complete");
        let _ = std::fs::remove_file(&path);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("x-device-name"), Some("porch"));
        assert_eq!(requests[0].body, b"RIFFtest");
        assert_eq!(panel.status(), Some(("Uploaded as porch_20250101_120000.wav", false)));
        assert!(panel.picked_file.is_none());
    }

    #[test]
    fn missing_local_file_surfaces_io_error() {
        let mut panel = UploadPanel::new();
        panel.device_name = "porch".to_owned();
        panel.picked_file = Some(std::env::temp_dir().join("device_audio_browser_missing.wav"));
        panel
            .submit(&ServerClient::new("http://127.0.0.1:9"), &egui::Context::default())
            .unwrap();

        assert!(!wait_until_done(&mut panel));
        let (message, is_error) = panel.status().unwrap();
        assert!(is_error);
        assert!(message.starts_with("IO error"));
    }
}
