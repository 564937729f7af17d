//! Single source of truth for the window-layer notification names.
//! A sync test verifies the `ContentEvent` mapping matches.

pub const SET_THEME: &str = "set-theme";
pub const LOAD_FILE: &str = "load-file";
pub const LOAD_DATA: &str = "load-data";
pub const WINDOW_ERROR: &str = "window-error";

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::window::ContentEvent;

    /// Verify that every notification a window can receive maps onto a
    /// constant in this module.
    #[test]
    fn events_sync_with_content_events() {
        let cases = [
            (ContentEvent::SetTheme(Theme::Dark).name(), SET_THEME),
            (ContentEvent::LoadFile("a.geojson".into()).name(), LOAD_FILE),
            (ContentEvent::LoadData(String::new()).name(), LOAD_DATA),
        ];
        for (name, expected) in cases {
            assert_eq!(name, expected);
        }
    }
}
