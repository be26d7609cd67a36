use crate::background::Pending;
use crate::client::ServerClient;
use crate::error::BrowserError;
use crate::listing::DeviceListing;

/// A decoded listing and the server it was fetched from
#[derive(Debug)]
pub struct LoadedListing {
    pub client: ServerClient,
    pub listing: DeviceListing,
}

/// Fetches the device listing without blocking the UI
#[derive(Default)]
pub struct ListingLoader {
    pending: Pending<Result<LoadedListing, BrowserError>>,
}

impl ListingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching `/files`. A request still in flight is superseded.
    pub fn request(&mut self, client: &ServerClient, ctx: &egui::Context) {
        let completer = self.pending.start();
        let client = client.clone();
        let ctx = ctx.clone();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = client
                .fetch_listing()
                .map(|listing| LoadedListing { client, listing });
            completer.complete(result);
            ctx.request_repaint();
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = client
                .fetch_listing()
                .await
                .map(|listing| LoadedListing { client, listing });
            completer.complete(result);
            ctx.request_repaint();
        });
    }

    /// Result of the latest request, once it is available
    pub fn poll(&mut self) -> Option<Result<LoadedListing, BrowserError>> {
        self.pending.poll()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_active()
    }
}
