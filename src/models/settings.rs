use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::link::require;

pub const DEFAULT_YEAR: i32 = 2026;
pub const DEFAULT_THEME: &str = "Year of the Spirit";

/// Banner shown across the site: the year and its theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub year: i32,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Settings {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        require("theme", &self.theme, &mut errors);
        if !(1..=9999).contains(&self.year) {
            errors.insert("year".to_string(), "Must be between 1 and 9999".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_banner() {
        let s = Settings::default();
        assert_eq!(s.year, 2026);
        assert_eq!(s.theme, "Year of the Spirit");
        assert!(s.is_default());
    }

    #[test]
    fn rejects_blank_theme_and_silly_year() {
        let errors = Settings { year: 0, theme: "  ".into() }.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
