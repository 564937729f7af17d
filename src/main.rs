// Prevents additional console window on Windows in release.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use geojson_app::map::MapView;
use geojson_app::paths;
use geojson_app::protocol::COMMAND_PORT;
use geojson_app::server;
use geojson_app::settings;
use geojson_app::state::AppContext;
use geojson_app::window::WindowProxy;

#[tokio::main]
async fn main() {
    let config_dir = paths::config_dir();
    let loaded_settings = settings::load_settings(&config_dir).unwrap_or_default();

    let ctx = Arc::new(AppContext::new(config_dir, loaded_settings));

    // The window's content channel. The GUI shell would drain this into a
    // webview; this host drains it into the headless map view.
    let (window, mut content_rx) = WindowProxy::channel();
    ctx.set_active_window(Some(window));

    // Claim the command port. Losing the race means another instance is
    // already serving launcher invocations; this process stays usable on its
    // own, it just never becomes a server.
    match server::start_command_server(ctx.clone(), COMMAND_PORT).await {
        Ok(port) => {
            eprintln!("[GeoJSON] Command server listening on http://127.0.0.1:{port}");
        }
        Err(e) => {
            eprintln!("[GeoJSON] {e}; another instance appears to be running");
        }
    }

    let mut view = MapView::new(ctx.clone());
    if let Err(e) = view.restore_session() {
        eprintln!("[GeoJSON] Could not restore last session: {e}");
    }

    loop {
        tokio::select! {
            event = content_rx.recv() => {
                match event {
                    Some(event) => {
                        let name = event.name();
                        if let Err(e) = view.apply(event) {
                            eprintln!("[GeoJSON] {name} failed: {e}");
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    ctx.set_active_window(None);
    if let Err(e) = ctx.save_settings() {
        eprintln!("[GeoJSON] Failed to save settings on exit: {e}");
    }
}
