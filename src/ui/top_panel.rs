use egui::{Context, RichText};
use egui_phosphor::regular;

/// What the user asked for from the top bar this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopPanelAction {
    /// Fetch the listing again
    Refresh,
    /// Play the newest recording on the server
    PlayLatest,
    /// Switch to the server URL typed in the bar
    ApplyServer,
    /// Show or hide the upload form
    ToggleUpload,
}

/// Top menu panel component
pub struct TopPanel;

impl TopPanel {
    /// Display the top menu panel
    pub fn show(
        ctx: &Context,
        server_input: &mut String,
        loading: bool,
        upload_open: bool,
    ) -> Option<TopPanelAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.label(RichText::new(format!("{} Device Audio Files", regular::WAVEFORM)).strong());
                ui.separator();

                // The web build always talks to the server that served the page
                if !cfg!(target_arch = "wasm32") {
                    ui.label("Server");
                    let response = ui.add(
                        egui::TextEdit::singleline(server_input)
                            .desired_width(220.0)
                            .hint_text("http://host:3000"),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        action = Some(TopPanelAction::ApplyServer);
                    }
                    if ui
                        .button(regular::CHECK)
                        .on_hover_text("Connect to this server")
                        .clicked()
                    {
                        action = Some(TopPanelAction::ApplyServer);
                    }
                    ui.separator();
                }

                let refresh = ui.add_enabled(
                    !loading,
                    egui::Button::new(format!("{} Refresh", regular::ARROW_CLOCKWISE)),
                );
                if refresh.clicked() {
                    action = Some(TopPanelAction::Refresh);
                }

                if ui
                    .button(format!("{} Play latest", regular::PLAY))
                    .on_hover_text("Newest recording from any device")
                    .clicked()
                {
                    action = Some(TopPanelAction::PlayLatest);
                }

                if !cfg!(target_arch = "wasm32")
                    && ui
                        .selectable_label(upload_open, format!("{} Upload", regular::UPLOAD_SIMPLE))
                        .clicked()
                {
                    action = Some(TopPanelAction::ToggleUpload);
                }

                if loading {
                    ui.spinner();
                }
            });
        });

        action
    }
}
