//! Translation lookup. Locale tables ship embedded in the binary; lookup is
//! by dotted key path, falling back to the `en` table and finally to the key
//! itself so a missing entry is visible instead of blank.

use serde_json::Value;

static EN: &str = include_str!("../translations/en.json");

/// Shipped locale tables, keyed by language tag.
const TABLES: [(&str, &str); 1] = [("en", EN)];

pub struct Translations {
    table: Value,
}

impl Translations {
    /// Table for a locale tag such as `en`, `en-US`, or `de_DE.UTF-8`.
    /// Unknown languages fall back to English.
    pub fn for_locale(locale: &str) -> Translations {
        let lang = locale
            .split(['_', '-', '.'])
            .next()
            .unwrap_or("en")
            .to_lowercase();
        let source = TABLES
            .iter()
            .find(|(tag, _)| *tag == lang)
            .map_or(EN, |(_, src)| *src);
        Translations {
            table: serde_json::from_str(source).unwrap_or(Value::Null),
        }
    }

    /// Table for the process locale (`LANG`), defaulting to English.
    pub fn from_env() -> Translations {
        let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
        Translations::for_locale(&locale)
    }

    /// Look up a dotted key path like `page.drawer_header_title`. Returns the
    /// key itself when no translation exists.
    pub fn get(&self, key: &str) -> String {
        let mut node = &self.table;
        for part in key.split('.') {
            match node.get(part) {
                Some(next) => node = next,
                None => return key.to_string(),
            }
        }
        match node {
            Value::String(s) => s.clone(),
            _ => key.to_string(),
        }
    }
}
