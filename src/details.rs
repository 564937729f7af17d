//! Drawer markup for a clicked feature's properties.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::geojson::FEATURE_KEY;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^[^@\s]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").unwrap()
});

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Build the drawer's `<dt>/<dd>` markup from a feature's properties, in
/// document order. The internal feature-id property is skipped; URL values
/// become links, image URLs also render inline, and email addresses become
/// `mailto:` links.
pub fn build_details(properties: &Map<String, Value>) -> String {
    let mut html = String::new();

    for (key, value) in properties {
        if key == FEATURE_KEY {
            continue;
        }
        let detail = render_value(value);
        html.push_str("<div class=\"property-details\"><dt>");
        html.push_str(key);
        html.push_str("</dt><dd>");
        html.push_str(&detail);
        html.push_str("</dd></div>");
    }

    html
}

fn render_value(value: &Value) -> String {
    let detail = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if detail.starts_with("http://") || detail.starts_with("https://") {
        let lower = detail.to_lowercase();
        if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return format!(
                "<a href=\"{detail}\" class=\"detail-link\">{detail}</a>\
                 <a href=\"{detail}\" class=\"detail-link\"><img src=\"{detail}\" class=\"detail-image\"></a>"
            );
        }
        return format!("<a href=\"{detail}\" class=\"detail-link\">{detail}</a>");
    }

    if EMAIL.is_match(&detail) {
        return format!("<a href=\"mailto:{detail}\" class=\"detail-link\">{detail}</a>");
    }

    detail
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_plain_properties_in_document_order() {
        let html = build_details(&props(&[
            ("name", Value::String("Travis County".into())),
            ("population", serde_json::json!(1_290_188)),
        ]));
        assert_eq!(
            html,
            "<div class=\"property-details\"><dt>name</dt><dd>Travis County</dd></div>\
             <div class=\"property-details\"><dt>population</dt><dd>1290188</dd></div>"
        );
    }

    #[test]
    fn test_feature_key_is_skipped() {
        let html = build_details(&props(&[
            (FEATURE_KEY, serde_json::json!(3)),
            ("name", Value::String("a".into())),
        ]));
        assert!(!html.contains(FEATURE_KEY));
        assert!(html.contains("<dt>name</dt>"));
    }

    #[test]
    fn test_url_becomes_link() {
        let html = build_details(&props(&[(
            "website",
            Value::String("https://civil.services/".into()),
        )]));
        assert!(html.contains("<a href=\"https://civil.services/\" class=\"detail-link\">"));
        assert!(!html.contains("detail-image"));
    }

    #[test]
    fn test_image_url_renders_inline() {
        let html = build_details(&props(&[(
            "photo",
            Value::String("http://example.com/seal.PNG".into()),
        )]));
        assert!(html.contains("<img src=\"http://example.com/seal.PNG\" class=\"detail-image\">"));
    }

    #[test]
    fn test_email_becomes_mailto() {
        let html = build_details(&props(&[(
            "contact",
            Value::String("clerk@traviscountytx.gov".into()),
        )]));
        assert!(html.contains("href=\"mailto:clerk@traviscountytx.gov\""));
    }

    #[test]
    fn test_non_email_text_left_alone() {
        let html = build_details(&props(&[("note", Value::String("open @ 9am".into()))]));
        assert!(!html.contains("mailto:"));
        assert!(html.contains("<dd>open @ 9am</dd>"));
    }
}
