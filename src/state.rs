use std::path::PathBuf;

use parking_lot::Mutex;

use crate::settings::AppSettings;
use crate::store::StoreError;
use crate::window::WindowProxy;

// ── Application context ────────────────────────────────────────────

/// Application state shared between the command server and the content layer.
///
/// The active window is registered through [`AppContext::set_active_window`]
/// rather than held in module-level state, so there is exactly one defined
/// place ownership of the window handle changes.
pub struct AppContext {
    pub config_dir: PathBuf,
    pub settings: Mutex<AppSettings>,
    active_window: Mutex<Option<WindowProxy>>,
}

impl AppContext {
    pub fn new(config_dir: PathBuf, settings: AppSettings) -> Self {
        Self {
            config_dir,
            settings: Mutex::new(settings),
            active_window: Mutex::new(None),
        }
    }

    /// Register (or clear) the window that receives content notifications.
    pub fn set_active_window(&self, window: Option<WindowProxy>) {
        *self.active_window.lock() = window;
    }

    /// Handle to the current window, if one is registered.
    pub fn active_window(&self) -> Option<WindowProxy> {
        self.active_window.lock().clone()
    }

    /// Read-only access to settings. Locks the mutex for the duration of `f`.
    pub fn with_settings<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppSettings) -> R,
    {
        let guard = self.settings.lock();
        f(&guard)
    }

    /// Mutating access to settings. Locks the mutex for the duration of `f`.
    pub fn with_settings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppSettings) -> R,
    {
        let mut guard = self.settings.lock();
        f(&mut guard)
    }

    /// Persist the current settings to the config directory.
    pub fn save_settings(&self) -> Result<(), StoreError> {
        let snapshot = self.settings.lock().clone();
        crate::settings::save_settings(&self.config_dir, &snapshot)
    }
}
