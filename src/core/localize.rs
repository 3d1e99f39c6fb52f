//! # Localization
//!
//! Titles are keyed by their canonical English text. A localizer maps a key
//! to a display string and must stay fixed for the life of one open sheet,
//! since selections are matched against the same strings the sheet showed.

use std::collections::HashMap;

pub trait Localizer: Send + Sync {
    fn get_string(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Localizer for English {
    fn get_string(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Looks keys up in a translation table, falling back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct TableLocalizer {
    strings: HashMap<String, String>,
}

impl TableLocalizer {
    pub fn new(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }
}

impl Localizer for TableLocalizer {
    fn get_string(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_identity() {
        assert_eq!(English.get_string("Reply"), "Reply");
    }

    #[test]
    fn test_table_falls_back_to_key() {
        let localizer = TableLocalizer::new(HashMap::from([(
            "Reply".to_string(),
            "Antworten".to_string(),
        )]));
        assert_eq!(localizer.get_string("Reply"), "Antworten");
        assert_eq!(localizer.get_string("Share"), "Share");
    }
}
