use egui::{Button, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular;

use crate::client::ServerClient;
use crate::listing::{DeviceListing, FileEntry};
use crate::ui::audio_player::AudioPlayer;

const HEADER_FILL: Color32 = Color32::from_rgb(59, 130, 246);
const HEADER_HEIGHT: f32 = 30.0;

/// One device with its recordings and whether its list is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSection {
    pub device: String,
    pub files: Vec<FileEntry>,
    pub expanded: bool,
}

/// Collapsible per-device list of recordings
#[derive(Debug, Default)]
pub struct FileBrowserView {
    /// Server the shown listing came from; entry URLs are built against it
    source: ServerClient,
    sections: Vec<DeviceSection>,
    rendered: bool,
}

impl FileBrowserView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with `listing` from `source`, every section collapsed
    pub fn render_listing(&mut self, source: ServerClient, listing: DeviceListing) {
        self.source = source;
        self.sections.clear();
        self.sections.extend(listing.into_groups().into_iter().map(|group| DeviceSection {
            device: group.device,
            files: group.files,
            expanded: false,
        }));
        self.rendered = true;
        log::debug!(
            "Rendered {} device sections from {:?}",
            self.sections.len(),
            self.source.base_url()
        );
    }

    pub fn sections(&self) -> &[DeviceSection] {
        &self.sections
    }

    /// Whether a listing has been rendered since start
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Flip one section between shown and hidden, returning its new state
    pub fn toggle_section(&mut self, index: usize) -> Option<bool> {
        let section = self.sections.get_mut(index)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }

    /// Play one entry through the shared player, returning the URL it was given
    pub fn click_file(
        &self,
        section: usize,
        file: usize,
        player: &mut AudioPlayer,
    ) -> Option<String> {
        let entry = self.sections.get(section)?.files.get(file)?;
        let url = self.source.file_url(&entry.filename);
        player.play_url(url.clone(), entry.human_timestamp.clone());
        Some(url)
    }

    /// Display the device sections
    pub fn show(&mut self, ui: &mut Ui, player: &mut AudioPlayer) {
        let mut toggled = None;
        let mut clicked = None;

        if self.rendered && self.sections.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(regular::FILE_DASHED).size(32.0).weak());
                ui.add_space(8.0);
                ui.label(RichText::new("No devices").weak());
            });
            return;
        }

        let current_url = player.current_url().map(str::to_owned);

        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            for (section_idx, section) in self.sections.iter().enumerate() {
                ui.push_id(section_idx, |ui| {
                    let caret = if section.expanded {
                        regular::CARET_DOWN
                    } else {
                        regular::CARET_RIGHT
                    };
                    let header = Button::new(
                        RichText::new(format!("{caret} {}", section.device)).color(Color32::WHITE),
                    )
                    .fill(HEADER_FILL);

                    let response = ui
                        .add_sized([ui.available_width(), HEADER_HEIGHT], header)
                        .on_hover_text(format!("{} recordings", section.files.len()));
                    if response.clicked() {
                        toggled = Some(section_idx);
                    }

                    if section.expanded {
                        ui.indent("files", |ui| {
                            for (file_idx, file) in section.files.iter().enumerate() {
                                let url = self.source.file_url(&file.filename);
                                let is_current = current_url.as_deref() == Some(url.as_str());
                                if ui
                                    .selectable_label(is_current, file.human_timestamp.as_str())
                                    .on_hover_text(file.filename.as_str())
                                    .clicked()
                                {
                                    clicked = Some((section_idx, file_idx));
                                }
                            }
                        });
                    }
                    ui.add_space(8.0);
                });
            }
        });

        // Process actions outside the UI loops
        if let Some(index) = toggled {
            self.toggle_section(index);
        }
        if let Some((section, file)) = clicked {
            self.click_file(section, file, player);
        }
    }
}
