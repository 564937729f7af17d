//! Shared definitions for the local command channel.
//!
//! The launcher and the command server agree on a fixed local port out of
//! band; whoever binds it first is the single running instance. The wire
//! payload keeps the historical `{ file?, data?, theme? }` shape while the
//! in-process representation is a tagged [`Command`], so presence/absence is
//! a type-level fact.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Well-known rendezvous port on 127.0.0.1.
pub const COMMAND_PORT: u16 = 5004;

/// Path of the single remote operation.
pub const OPEN_ROUTE: &str = "/api/open";

/// Path the launcher probes to decide whether an instance is running.
pub const HEALTH_ROUTE: &str = "/health";

pub fn base_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}")
}

// ── Wire DTO ─────────────────────────────────────────────────────

/// The `open` request as it travels over the channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

// ── Typed command ────────────────────────────────────────────────

/// Content carried by an open command.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenPayload {
    File(PathBuf),
    Data(String),
}

/// A one-shot instruction from a launcher invocation. Built once, consumed
/// exactly once by the server, then discarded. The theme travels
/// independently of the payload: a theme-only command is valid and simply
/// restyles the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub theme: Option<Theme>,
    pub payload: Option<OpenPayload>,
}

impl From<OpenRequest> for Command {
    fn from(req: OpenRequest) -> Self {
        // A file path wins over inline data when a caller sends both.
        let payload = match (req.file, req.data) {
            (Some(file), _) => Some(OpenPayload::File(PathBuf::from(file))),
            (None, Some(data)) => Some(OpenPayload::Data(data)),
            (None, None) => None,
        };
        Command {
            theme: req.theme.as_deref().and_then(Theme::parse),
            payload,
        }
    }
}

impl Command {
    /// Wire form of this command.
    pub fn to_request(&self) -> OpenRequest {
        let (file, data) = match &self.payload {
            Some(OpenPayload::File(path)) => (Some(path.to_string_lossy().into_owned()), None),
            Some(OpenPayload::Data(text)) => (None, Some(text.clone())),
            None => (None, None),
        };
        OpenRequest {
            file,
            data,
            theme: self.theme.map(|t| t.as_str().to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_theme_passes_through() {
        for theme in Theme::ALL {
            let cmd = Command::from(OpenRequest {
                theme: Some(theme.as_str().to_string()),
                ..OpenRequest::default()
            });
            assert_eq!(cmd.theme, Some(theme));
        }
    }

    #[test]
    fn test_unknown_theme_is_unset() {
        let cmd = Command::from(OpenRequest {
            theme: Some("sepia".into()),
            file: Some("/maps/a.geojson".into()),
            ..OpenRequest::default()
        });
        assert_eq!(cmd.theme, None);
        assert_eq!(
            cmd.payload,
            Some(OpenPayload::File(PathBuf::from("/maps/a.geojson")))
        );
    }

    #[test]
    fn test_file_takes_precedence_over_data() {
        let cmd = Command::from(OpenRequest {
            file: Some("/maps/a.geojson".into()),
            data: Some("{\"type\":\"FeatureCollection\"}".into()),
            theme: None,
        });
        assert_eq!(
            cmd.payload,
            Some(OpenPayload::File(PathBuf::from("/maps/a.geojson")))
        );
    }

    #[test]
    fn test_theme_only_command_has_no_payload() {
        let cmd = Command::from(OpenRequest {
            theme: Some("light".into()),
            ..OpenRequest::default()
        });
        assert_eq!(cmd.theme, Some(Theme::Light));
        assert_eq!(cmd.payload, None);
    }

    #[test]
    fn test_wire_round_trip() {
        let cmd = Command {
            theme: Some(Theme::SatelliteStreets),
            payload: Some(OpenPayload::Data("{}".into())),
        };
        let wire = serde_json::to_string(&cmd.to_request()).unwrap();
        let back: OpenRequest = serde_json::from_str(&wire).unwrap();
        assert_eq!(Command::from(back), cmd);
    }

    #[test]
    fn test_empty_fields_not_serialized() {
        let wire = serde_json::to_value(OpenRequest::default()).unwrap();
        assert_eq!(wire, serde_json::json!({}));
    }
}
