//! Application entry point: Chattr desktop client.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`ClientSettings`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime.
//! 4. Build the HTTP client for the chat server and probe `/health`.
//! 5. Create the submission and event channels.
//! 6. Run [`eframe::run_native`]; the submission runner is spawned once the
//!    egui context exists so it can request repaints.

use std::sync::Arc;

use anyhow::Context as _;
use chattr::{
    api::{ChatApi, HttpChatApi},
    app::ChattrApp,
    config::{AppPaths, ClientSettings},
    session::{SessionEvent, Submission, SubmissionRunner},
};
use eframe::egui;
use tokio::sync::mpsc;

fn native_options() -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title("Chattr")
        .with_inner_size([720.0, 560.0])
        .with_min_inner_size([480.0, 360.0]);

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Chattr starting up");

    // 2. Settings
    let paths = AppPaths::new();
    let settings = ClientSettings::load_from(&paths.settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load settings ({e}); using defaults");
        ClientSettings::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Chat server client
    let http = HttpChatApi::from_settings(&settings);
    match rt.block_on(http.health()) {
        Ok(health) if health.llm_configured => {
            log::info!("Connected to chat server {} (v{})", http.base_url(), health.version)
        }
        Ok(health) => log::warn!(
            "Chat server {} (v{}) has no language model; conversations will be translation only",
            http.base_url(),
            health.version
        ),
        Err(e) => log::warn!("Chat server {} not reachable yet: {e}", http.base_url()),
    }
    let api: Arc<dyn ChatApi> = Arc::new(http);

    // 5. Channels
    let (submit_tx, submit_rx) = mpsc::channel::<Submission>(16);
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();

    // 6. UI
    let app = ChattrApp::new(settings, paths.settings_file, submit_tx, event_rx);
    let handle = rt.handle().clone();

    eframe::run_native(
        "Chattr",
        native_options(),
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let runner = SubmissionRunner::new(api, event_tx).with_notify(move || ctx.request_repaint());
            handle.spawn(runner.run(submit_rx));
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))?;

    log::info!("Chattr shut down");
    Ok(())
}
