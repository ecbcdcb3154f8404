//! Configuration file location
//!
//! ## Resolution Order
//!
//! 1. An explicit path (the `--config` flag)
//! 2. `PROFILE_SEEDER_CONFIG` environment variable (if set and non-empty)
//! 3. `config.ini` in the current working directory

use std::path::PathBuf;

/// Environment variable that overrides the configuration file location
pub const CONFIG_ENV_VAR: &str = "PROFILE_SEEDER_CONFIG";

/// Default configuration filename, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Resolve the configuration file to read
pub fn resolve_config_file(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
