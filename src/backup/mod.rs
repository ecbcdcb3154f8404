//! Backup system for profile-seeder
//!
//! Provides timestamped snapshots of game data folders with a retention
//! limit.
//!
//! # Layout
//!
//! ```text
//! <backup_path>/<backup_folder>/<game_id>/<YYYYMMDDHHMMSS>/<files>
//! ```
//!
//! Each snapshot holds copies of the regular files found directly in the
//! game's folder under the user folder. Subdirectories are not included.
//!
//! # Retention
//!
//! With `max_versions = N` set, only the N most recently modified entries of
//! a game's snapshot directory survive a backup run. Blank or zero keeps
//! everything.
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_seeder::backup::BackupManager;
//! use profile_seeder::config::Settings;
//!
//! let settings = Settings::load("config.ini".as_ref())?;
//! let manager = BackupManager::from_settings(&settings)?;
//! for (game_id, report) in manager.backup_all()? {
//!     println!("{}: {:?}", game_id, report.map(|r| r.snapshot));
//! }
//! ```

mod manager;

pub use manager::{
    backup_files, create_backup_folder, list_snapshots, parse_snapshot_timestamp, prune_oldest,
    BackupManager, SnapshotInfo, SnapshotReport,
};
