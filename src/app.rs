use crate::client::ServerClient;
use crate::loader::ListingLoader;
use crate::settings::Settings;
use crate::ui::{AudioPlayer, FileBrowserView, TopPanel, TopPanelAction};

#[cfg(not(target_arch = "wasm32"))]
use crate::ui::UploadPanel;

/// Browser for recordings grouped by device
pub struct DeviceAudioBrowserApp {
    settings: Settings,
    /// Server URL as typed, applied on Enter
    server_input: String,
    browser: FileBrowserView,
    player: AudioPlayer,
    loader: ListingLoader,
    #[cfg(not(target_arch = "wasm32"))]
    upload: UploadPanel,
    upload_open: bool,
}

impl DeviceAudioBrowserApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, server_override: Option<String>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Load previous settings (if any).
        let mut settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, Settings::STORAGE_KEY))
            .unwrap_or_default();
        if let Some(server) = server_override {
            log::info!("Using server from command line: {server}");
            settings.server_url = server;
        }

        let mut app = Self::with_settings(settings, AudioPlayer::new());
        app.refresh(&cc.egui_ctx);
        app
    }

    fn with_settings(settings: Settings, mut player: AudioPlayer) -> Self {
        player.set_volume(settings.volume);
        Self {
            server_input: settings.server_url.clone(),
            browser: FileBrowserView::new(),
            settings,
            player,
            loader: ListingLoader::new(),
            #[cfg(not(target_arch = "wasm32"))]
            upload: UploadPanel::new(),
            upload_open: false,
        }
    }

    /// Fetch the listing again; it is rendered once it arrives
    fn refresh(&mut self, ctx: &egui::Context) {
        self.loader.request(&self.settings.server_client(), ctx);
    }

    /// Fetch from the typed server; shown entries keep their own server until its listing arrives
    fn apply_server(&mut self, ctx: &egui::Context) {
        let client = ServerClient::new(&self.server_input);
        log::info!("Switching server to {:?}", client.base_url());
        self.settings.server_url = client.base_url().to_owned();
        self.server_input = self.settings.server_url.clone();
        self.refresh(ctx);
    }

    fn handle_action(&mut self, action: TopPanelAction, ctx: &egui::Context) {
        match action {
            TopPanelAction::Refresh => self.refresh(ctx),
            TopPanelAction::PlayLatest => {
                let url = self.settings.server_client().latest_url();
                self.player.play_url(url, "Latest recording");
            }
            TopPanelAction::ApplyServer => self.apply_server(ctx),
            TopPanelAction::ToggleUpload => self.upload_open = !self.upload_open,
        }
    }

    /// Render a finished listing fetch; failures leave the current view as it was
    fn poll_listing(&mut self) {
        match self.loader.poll() {
            Some(Ok(loaded)) => self.browser.render_listing(loaded.client, loaded.listing),
            Some(Err(e)) => log::error!("Failed to load listing: {e}"),
            None => {}
        }
    }
}

impl eframe::App for DeviceAudioBrowserApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.volume = self.player.volume();
        eframe::set_value(storage, Settings::STORAGE_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_listing();

        if let Some(action) = TopPanel::show(
            ctx,
            &mut self.server_input,
            self.loader.is_loading(),
            self.upload_open,
        ) {
            self.handle_action(action, ctx);
        }

        self.player.show(ctx);

        #[cfg(not(target_arch = "wasm32"))]
        if self.upload_open {
            let client = self.settings.server_client();
            let mut uploaded = false;
            egui::SidePanel::right("upload_panel")
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    uploaded = self.upload.show(ui, &client);
                });
            if uploaded {
                self.refresh(ctx);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.browser.show(ui, &mut self.player);
        });
    }
}
