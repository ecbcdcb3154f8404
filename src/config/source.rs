//! Configuration file reading
//!
//! The file is parsed with `rust-ini`. Only the `[DEFAULT]` section (and
//! entries before the first header) are read; keys are matched
//! case-insensitively and a key given twice is rejected.

use std::collections::HashMap;
use std::path::Path;

use ini::{Ini, ParseOption};

use crate::error::{SeederError, SeederResult};

/// Name of the section settings are read from
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Key/value pairs of the default section
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    defaults: HashMap<String, String>,
}

impl ConfigSource {
    /// Read and parse a file from disk
    pub fn load(path: &Path) -> SeederResult<Self> {
        if !path.exists() {
            return Err(SeederError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SeederError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&contents)
    }

    /// Parse INI text
    pub fn parse(text: &str) -> SeederResult<Self> {
        // Values are kept verbatim; quotes are stripped by the getters and
        // Windows paths must keep their backslashes.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };

        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| SeederError::Config(format!("Invalid configuration: {}", e)))?;

        let mut defaults = HashMap::new();
        for (section, properties) in ini.iter() {
            if section.is_some_and(|name| name != DEFAULT_SECTION) {
                continue;
            }

            for (key, value) in properties.iter() {
                let key = key.trim().to_lowercase();
                if defaults.insert(key.clone(), value.trim().to_string()).is_some() {
                    return Err(SeederError::Config(format!(
                        "Option '{}' is set more than once in section [{}]",
                        key, DEFAULT_SECTION
                    )));
                }
            }
        }

        Ok(Self { defaults })
    }

    /// Look up a key in the default section
    pub fn get(&self, key: &str) -> Option<&str> {
        self.defaults.get(&key.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_section() {
        let source = ConfigSource::parse(
            "[DEFAULT]\npath = \"C:/Steam/userdata\"\nuserfolder: 12345\n",
        )
        .unwrap();

        assert_eq!(source.get("path"), Some("\"C:/Steam/userdata\""));
        assert_eq!(source.get("userfolder"), Some("12345"));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let source = ConfigSource::parse("[DEFAULT]\nGame_IDs = 220\n").unwrap();
        assert_eq!(source.get("game_ids"), Some("220"));
        assert_eq!(source.get("GAME_IDS"), Some("220"));
    }

    #[test]
    fn test_entries_without_header_are_default() {
        let source = ConfigSource::parse("path = /data\n").unwrap();
        assert_eq!(source.get("path"), Some("/data"));
    }

    #[test]
    fn test_comments_and_other_sections() {
        let source = ConfigSource::parse(
            "# comment\n; other\n[DEFAULT]\npath = /a\n[extra]\npath = /b\nname = x\n",
        )
        .unwrap();

        assert_eq!(source.get("path"), Some("/a"));
        assert_eq!(source.get("name"), None);
    }

    #[test]
    fn test_backslashes_are_kept() {
        let source = ConfigSource::parse("path = C:\\Steam\\userdata\n").unwrap();
        assert_eq!(source.get("path"), Some("C:\\Steam\\userdata"));
    }

    #[test]
    fn test_empty_value() {
        let source = ConfigSource::parse("max_versions =\n").unwrap();
        assert_eq!(source.get("max_versions"), Some(""));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = ConfigSource::parse("[DEFAULT]\npath = /a\npath = /b\n").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_duplicate_key_differing_in_case_is_rejected() {
        let err = ConfigSource::parse("[DEFAULT]\nPath = /a\npath = /b\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigSource::load(Path::new("/nonexistent/config.ini")).unwrap_err();
        assert!(err.is_config());
    }
}
