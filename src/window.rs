//! The seam between the command server and the window's content layer.
//!
//! The GUI shell is an external collaborator; inside this crate a window is
//! a handle that accepts fire-and-forget content notifications. Nothing is
//! acknowledged back to the sender.

use std::path::PathBuf;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::AppError;
use crate::events;
use crate::theme::Theme;

/// A notification consumed by the window's content layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEvent {
    SetTheme(Theme),
    LoadFile(PathBuf),
    LoadData(String),
}

impl ContentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ContentEvent::SetTheme(_) => events::SET_THEME,
            ContentEvent::LoadFile(_) => events::LOAD_FILE,
            ContentEvent::LoadData(_) => events::LOAD_DATA,
        }
    }
}

/// Cheap clonable handle to the active window's content channel.
#[derive(Clone)]
pub struct WindowProxy {
    tx: UnboundedSender<ContentEvent>,
}

impl WindowProxy {
    /// Create a proxy plus the receiving end the content layer drains.
    pub fn channel() -> (WindowProxy, UnboundedReceiver<ContentEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (WindowProxy { tx }, rx)
    }

    /// Send a notification. Fails only when the window side is gone.
    pub fn send(&self, event: ContentEvent) -> Result<(), AppError> {
        self.tx.send(event).map_err(|_| AppError::WindowUnavailable)
    }
}
