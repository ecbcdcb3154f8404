//! Configuration module for profile-seeder
//!
//! This module provides configuration management including:
//! - INI file reading
//! - Configuration file location
//! - Validated, typed settings

pub mod paths;
pub mod settings;
pub mod source;

pub use paths::resolve_config_file;
pub use settings::{strip_quotes, BackupSettings, Settings};
