use serde::{Deserialize, Serialize};

use crate::util::from_serde_str;

/// Map visual style. A closed set: anything outside it is treated as unset
/// and the application falls back to the persisted (or default) theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Dark,
    Light,
    Outdoors,
    Satellite,
    Streets,
    SatelliteStreets,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Dark,
        Theme::Light,
        Theme::Outdoors,
        Theme::Satellite,
        Theme::Streets,
        Theme::SatelliteStreets,
    ];

    /// Parse a theme name. Returns `None` for anything outside the closed set;
    /// callers treat that as "unset", never as an error.
    pub fn parse(name: &str) -> Option<Theme> {
        from_serde_str(name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Outdoors => "outdoors",
            Theme::Satellite => "satellite",
            Theme::Streets => "streets",
            Theme::SatelliteStreets => "satellite-streets",
        }
    }

    /// Paint values for the GeoJSON overlay layers on this base style.
    pub fn paint(self) -> LayerPaint {
        match self {
            Theme::Dark => LayerPaint {
                line_color: "#fdc70d",
                line_opacity: 0.35,
                fill_color: "#fdc70d",
                fill_opacity: 0.2,
                fill_opacity_active: 0.3,
            },
            Theme::Light => LayerPaint {
                line_color: "#27b0fd",
                line_opacity: 0.35,
                fill_color: "#27b0fd",
                fill_opacity: 0.2,
                fill_opacity_active: 0.3,
            },
            Theme::Outdoors => LayerPaint {
                line_color: "#ed1200",
                line_opacity: 0.4,
                fill_color: "#ed1200",
                fill_opacity: 0.3,
                fill_opacity_active: 0.4,
            },
            Theme::Satellite => LayerPaint {
                line_color: "#0085e7",
                line_opacity: 0.4,
                fill_color: "#0085e7",
                fill_opacity: 0.3,
                fill_opacity_active: 0.4,
            },
            Theme::Streets => LayerPaint {
                line_color: "#ed1200",
                line_opacity: 0.4,
                fill_color: "#ed1200",
                fill_opacity: 0.3,
                fill_opacity_active: 0.4,
            },
            Theme::SatelliteStreets => LayerPaint {
                line_color: "#fdc70d",
                line_opacity: 0.45,
                fill_color: "#fdc70d",
                fill_opacity: 0.35,
                fill_opacity_active: 0.45,
            },
        }
    }
}

/// Colors and opacities for the overlay layers rendered on top of a base style.
/// `fill_opacity_active` applies to the hover and selected fills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerPaint {
    pub line_color: &'static str,
    pub line_opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub fill_opacity_active: f64,
}
