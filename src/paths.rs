//! Centralized path definitions for all data files and directories.
//!
//! This module is the single source of truth for the app id, leaf filenames,
//! and the config-dir resolution shared by the application and the CLI
//! launcher. No other module should hard-code these strings.

use std::path::{Path, PathBuf};

// ── Application identity ─────────────────────────────────────────

pub const APP_ID: &str = "com.civilservices.geojson";

// ── Leaf filenames ───────────────────────────────────────────────

pub const SETTINGS_FILE: &str = "settings.json";

// ── Config-dir functions ─────────────────────────────────────────

pub fn settings_path(app_config_dir: &Path) -> PathBuf {
    app_config_dir.join(SETTINGS_FILE)
}

/// Resolve the OS config directory for this app.
///
/// Windows: `%APPDATA%\<app id>`; macOS: `~/Library/Application Support/<app id>`;
/// elsewhere: `$XDG_CONFIG_HOME/<app id>` falling back to `~/.config/<app id>`.
pub fn config_dir() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA").map_or_else(
            |_| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"),
            PathBuf::from,
        )
    } else if cfg!(target_os = "macos") {
        home_dir().join("Library/Application Support")
    } else {
        std::env::var("XDG_CONFIG_HOME").map_or_else(|_| home_dir().join(".config"), PathBuf::from)
    };
    base.join(APP_ID)
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
}
