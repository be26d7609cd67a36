#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

/// Value of `--server <url>` or `--server=<url>`, if given
#[cfg(not(target_arch = "wasm32"))]
fn server_from_args(argv: &[String]) -> Option<String> {
    let mut i = 0usize;
    while i < argv.len() {
        let a = &argv[i];
        if a == "--server" {
            return argv.get(i + 1).cloned();
        }
        if let Some(url) = a.strip_prefix("--server=") {
            return Some(url.to_owned());
        }
        i += 1;
    }
    None
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Usage:
    //   device_audio_browser [--server http://host:3000]
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let server_override = server_from_args(&argv);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Device Audio Files",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(device_audio_browser::DeviceAudioBrowserApp::new(
                cc,
                server_override,
            )))
        }),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(device_audio_browser::DeviceAudioBrowserApp::new(
                        cc, None,
                    )))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
