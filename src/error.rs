use std::fmt;

/// Structured error type for the application. Replaces stringly-typed errors
/// so callers can match on the failure class instead of parsing messages.
#[derive(Debug)]
pub enum AppError {
    /// The launcher exhausted its retry budget without reaching the server.
    ConnectFailed { attempts: u32 },
    /// The launcher could not start the application process.
    Spawn { message: String },
    /// The command server could not claim its port.
    Bind { port: u16, message: String },
    /// The server rejected or failed an open command.
    Api { message: String },
    /// The window channel is gone; content notifications have nowhere to go.
    WindowUnavailable,
    /// A document failed to parse or render.
    Document { message: String },
    IoError { message: String },
    Store(crate::store::StoreError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConnectFailed { attempts } => {
                write!(f, "can't connect to geojson (gave up after {attempts} attempts)")
            }
            AppError::Spawn { message } => write!(f, "failed to launch application: {message}"),
            AppError::Bind { port, message } => {
                write!(f, "failed to bind command port {port}: {message}")
            }
            AppError::Api { message } => write!(f, "command channel error: {message}"),
            AppError::WindowUnavailable => write!(f, "no window available"),
            AppError::Document { message } => write!(f, "{message}"),
            AppError::IoError { message } => write!(f, "I/O error: {message}"),
            AppError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError {
            message: e.to_string(),
        }
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(e: crate::store::StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Api {
            message: e.to_string(),
        }
    }
}
