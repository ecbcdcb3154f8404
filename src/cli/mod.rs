//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library modules.

pub mod backup;
pub mod config;
pub mod watch;

pub use backup::{handle_backup_command, BackupCommands};
pub use config::handle_config_command;
pub use watch::{handle_seed_command, handle_watch_command};
