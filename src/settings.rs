use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::{read_json, write_json, StoreError};
use crate::theme::Theme;

/// Last known geometry of the main window, persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: 1280,
            height: 720,
            maximized: false,
        }
    }
}

/// Application-level settings stored in the OS config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub version: u32,
    /// Mapbox access token; file opening stays disabled until one is set.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    /// Most recently opened document, re-opened on startup.
    #[serde(default)]
    pub last_file: Option<PathBuf>,
    #[serde(default)]
    pub last_window_state: WindowState,
}

const SETTINGS_VERSION: u32 = 1;

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            access_token: None,
            theme: Theme::default(),
            last_file: None,
            last_window_state: WindowState::default(),
        }
    }
}

impl AppSettings {
    /// Record window geometry after a resize or move.
    pub fn store_window_state(&mut self, state: WindowState) {
        self.last_window_state = state;
    }
}

/// Load settings from the app config directory. Returns None if no settings
/// file exists or it fails to parse (the caller falls back to defaults).
pub fn load_settings(app_config_dir: &Path) -> Option<AppSettings> {
    let path = crate::paths::settings_path(app_config_dir);
    if !path.exists() {
        return None;
    }
    read_json::<AppSettings>(&path).ok()
}

/// Save settings to the app config directory.
pub fn save_settings(app_config_dir: &Path, settings: &AppSettings) -> Result<(), StoreError> {
    std::fs::create_dir_all(app_config_dir)?;
    write_json(&crate::paths::settings_path(app_config_dir), settings)
}
