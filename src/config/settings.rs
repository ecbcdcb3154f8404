//! Validated settings for profile-seeder
//!
//! Loads the `[DEFAULT]` section of the configuration file once at startup
//! and exposes typed getters. Settings are immutable after loading.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::source::ConfigSource;
use crate::error::{SeederError, SeederResult};
use crate::fs_ops::is_nested_under;

/// Keys that must be present and non-blank
pub const REQUIRED_KEYS: [&str; 3] = ["path", "userfolder", "game_ids"];

/// Keys that become required once backups are configured
pub const BACKUP_KEYS: [&str; 2] = ["backup_path", "backup_folder"];

/// Backup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupSettings {
    /// Directory holding the backup folder
    pub backup_path: String,
    /// Name of the backup folder under `backup_path`
    pub backup_folder: String,
    /// Number of snapshots to keep per game, `None` keeps everything
    pub max_versions: Option<usize>,
}

impl BackupSettings {
    /// Full path of the backup root (`backup_path/backup_folder`)
    pub fn backup_root(&self) -> PathBuf {
        Path::new(&self.backup_path).join(&self.backup_folder)
    }
}

/// Settings loaded from the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    path: String,
    userfolder: String,
    game_ids: Vec<String>,
    backup: Option<BackupSettings>,
}

impl Settings {
    /// Load and validate settings from a configuration file
    pub fn load(config_file: &Path) -> SeederResult<Self> {
        let doc = ConfigSource::load(config_file)?;
        Self::from_document(&doc)
    }

    /// Validate settings from INI text
    pub fn parse(text: &str) -> SeederResult<Self> {
        let doc = ConfigSource::parse(text)?;
        Self::from_document(&doc)
    }

    /// Validate settings from an already parsed document
    pub fn from_document(doc: &ConfigSource) -> SeederResult<Self> {
        for key in REQUIRED_KEYS {
            require(doc, key)?;
        }

        let path = require(doc, "path")?;
        let userfolder = require(doc, "userfolder")?;
        let game_ids = parse_game_ids(doc.get("game_ids").unwrap_or_default());

        let backup_configured = BACKUP_KEYS.iter().any(|key| value(doc, key).is_some());
        let backup = if backup_configured {
            for key in BACKUP_KEYS {
                require(doc, key)?;
            }
            Some(BackupSettings {
                backup_path: require(doc, "backup_path")?,
                backup_folder: require(doc, "backup_folder")?,
                max_versions: parse_max_versions(doc.get("max_versions"))?,
            })
        } else {
            None
        };

        // Snapshot folders have all-digit names and would be seeded as profiles
        if let Some(backup) = &backup {
            if is_nested_under(&backup.backup_root(), Path::new(&path)) {
                return Err(SeederError::Config(format!(
                    "Backup folder {} must not be inside the watched path {}",
                    backup.backup_root().display(),
                    path
                )));
            }
        }

        Ok(Self {
            path,
            userfolder,
            game_ids,
            backup,
        })
    }

    /// The watched root path
    pub fn root_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Name of the user folder holding the per-game data
    pub fn userfolder(&self) -> &str {
        &self.userfolder
    }

    /// Full path of the user folder (`path/userfolder`)
    pub fn userfolder_path(&self) -> PathBuf {
        self.root_path().join(&self.userfolder)
    }

    /// Configured game identifiers, in file order
    pub fn game_ids(&self) -> &[String] {
        &self.game_ids
    }

    /// Backup configuration, if backups are enabled
    pub fn backup(&self) -> Option<&BackupSettings> {
        self.backup.as_ref()
    }

    /// Maximum number of snapshots to keep, if backups are enabled and limited
    pub fn max_versions(&self) -> Option<usize> {
        self.backup.as_ref().and_then(|b| b.max_versions)
    }
}

/// Remove one pair of surrounding double quotes, if present
pub fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Split a comma-separated list of game ids, trimming each token
pub fn parse_game_ids(raw: &str) -> Vec<String> {
    strip_quotes(raw.trim())
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

fn parse_max_versions(raw: Option<&str>) -> SeederResult<Option<usize>> {
    let Some(raw) = raw.map(|v| strip_quotes(v.trim()).trim()) else {
        return Ok(None);
    };

    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<usize>().map(Some).map_err(|_| {
        SeederError::Config(format!("Value for max_versions is not a number: {}", raw))
    })
}

/// Quote-stripped, non-blank value of a key
fn value(doc: &ConfigSource, key: &str) -> Option<String> {
    doc.get(key)
        .map(|v| strip_quotes(v.trim()).trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(doc: &ConfigSource, key: &str) -> SeederResult<String> {
    value(doc, key).ok_or_else(|| SeederError::missing_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASIC: &str = "[DEFAULT]\npath = \"/data/userdata\"\nuserfolder = \"u1\"\ngame_ids = 220, 730\n";

    #[test]
    fn test_load_basic() {
        let settings = Settings::parse(BASIC).unwrap();
        assert_eq!(settings.root_path(), Path::new("/data/userdata"));
        assert_eq!(settings.userfolder(), "u1");
        assert_eq!(settings.userfolder_path(), PathBuf::from("/data/userdata/u1"));
        assert_eq!(settings.game_ids(), ["220", "730"]);
        assert!(settings.backup().is_none());
    }

    #[test]
    fn test_each_missing_key_is_named() {
        let lines = [
            ("path", "path = /data"),
            ("userfolder", "userfolder = u1"),
            ("game_ids", "game_ids = 220"),
        ];

        for (missing, _) in &lines {
            let text: String = lines
                .iter()
                .filter(|(key, _)| key != missing)
                .map(|(_, line)| format!("{}\n", line))
                .collect();

            let err = Settings::parse(&text).unwrap_err();
            assert!(err.is_config());
            assert!(
                err.to_string().contains(missing),
                "error '{}' should name '{}'",
                err,
                missing
            );
        }
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let err = Settings::parse("path = /data\nuserfolder =   \ngame_ids = 220\n").unwrap_err();
        assert!(err.to_string().contains("userfolder"));

        let err = Settings::parse("path = \"\"\nuserfolder = u1\ngame_ids = 220\n").unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_first_missing_key_reported() {
        let err = Settings::parse("game_ids = 220\n").unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"C:/Steam\""), "C:/Steam");
        assert_eq!(strip_quotes("C:/Steam"), "C:/Steam");
        assert_eq!(strip_quotes("\"\"x\"\""), "\"x\"");
        assert_eq!(strip_quotes("\"open"), "\"open");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes(""), "");
    }

    #[test]
    fn test_parse_game_ids() {
        assert_eq!(parse_game_ids("a, b ,c"), ["a", "b", "c"]);
        assert_eq!(parse_game_ids("220,220"), ["220", "220"]);
        assert_eq!(parse_game_ids("\"220,730\""), ["220", "730"]);
        assert_eq!(parse_game_ids("220,"), ["220"]);
    }

    #[test]
    fn test_backup_settings() {
        let text = format!(
            "{}backup_path = \"/backups\"\nbackup_folder = seeder\nmax_versions = 5\n",
            BASIC
        );
        let settings = Settings::parse(&text).unwrap();
        let backup = settings.backup().unwrap();

        assert_eq!(backup.backup_root(), PathBuf::from("/backups/seeder"));
        assert_eq!(settings.max_versions(), Some(5));
    }

    #[test]
    fn test_blank_max_versions_is_none() {
        let text = format!(
            "{}backup_path = /backups\nbackup_folder = seeder\nmax_versions =\n",
            BASIC
        );
        let settings = Settings::parse(&text).unwrap();
        assert!(settings.backup().is_some());
        assert_eq!(settings.max_versions(), None);
    }

    #[test]
    fn test_partial_backup_config_is_rejected() {
        let text = format!("{}backup_path = /backups\n", BASIC);
        let err = Settings::parse(&text).unwrap_err();
        assert!(err.to_string().contains("backup_folder"));
    }

    #[test]
    fn test_backup_root_inside_watched_path_is_rejected() {
        let text = format!(
            "{}backup_path = \"/data/userdata/backups\"\nbackup_folder = seeder\n",
            BASIC
        );
        let err = Settings::parse(&text).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("must not be inside"));

        let text = format!("{}backup_path = /data\nbackup_folder = seeder\n", BASIC);
        assert!(Settings::parse(&text).is_ok());
    }

    #[test]
    fn test_invalid_max_versions() {
        let text = format!(
            "{}backup_path = /b\nbackup_folder = s\nmax_versions = many\n",
            BASIC
        );
        let err = Settings::parse(&text).unwrap_err();
        assert!(err.to_string().contains("max_versions"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("config.ini");
        std::fs::write(&file, BASIC).unwrap();

        let settings = Settings::load(&file).unwrap();
        assert_eq!(settings.game_ids().len(), 2);
    }

    #[test]
    fn test_serializes_to_json() {
        let settings = Settings::parse(BASIC).unwrap();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["userfolder"], "u1");
        assert!(json["backup"].is_null());
    }
}
