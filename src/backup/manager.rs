//! Backup manager for profile-seeder
//!
//! Snapshots are plain directories named after the local time they were
//! taken (`YYYYMMDDHHMMSS`), each holding copies of the regular files of the
//! source folder. Retention keeps the most recently modified entries.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::settings::{strip_quotes, Settings};
use crate::error::{SeederError, SeederResult};
use crate::fs_ops::copy_files_flat;

/// Timestamp format used for snapshot folder names
pub const SNAPSHOT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Metadata about a snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    /// Snapshot folder name
    pub name: String,
    /// Full path to the snapshot
    pub path: PathBuf,
    /// When the snapshot was taken (local time)
    pub created_at: NaiveDateTime,
    /// Number of files in the snapshot
    pub file_count: usize,
    /// Total size of the files in bytes
    pub size_bytes: u64,
}

/// Outcome of a single `backup_files` call
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    /// The snapshot folder that was created
    pub snapshot: PathBuf,
    /// Files copied into the snapshot
    pub copied_files: Vec<PathBuf>,
    /// Entries removed by retention
    pub pruned: Vec<PathBuf>,
}

/// Create `root/name` if it does not exist yet
///
/// Surrounding quotes on `root` are ignored. Calling this again for an
/// existing folder is a no-op.
pub fn create_backup_folder(root: &str, name: &str) -> SeederResult<PathBuf> {
    let folder_path = Path::new(strip_quotes(root)).join(name);

    if !folder_path.exists() {
        info!("Creating backup folder: {}", folder_path.display());
        fs::create_dir_all(&folder_path).map_err(|e| {
            SeederError::Io(format!(
                "Failed to create backup folder {}: {}",
                folder_path.display(),
                e
            ))
        })?;
    }

    Ok(folder_path)
}

/// Snapshot the regular files of `src` into a new timestamped folder under `dest`
///
/// When `max_versions` is `Some(n)` with `n > 0`, every entry of `dest`
/// beyond the `n` most recently modified is deleted afterwards. A second
/// snapshot of the same `dest` within one second fails because the folder
/// already exists.
pub fn backup_files(
    src: &Path,
    dest: &Path,
    max_versions: Option<usize>,
) -> SeederResult<SnapshotReport> {
    let timestamp = Local::now().format(SNAPSHOT_FORMAT).to_string();
    let snapshot = dest.join(&timestamp);

    fs::create_dir_all(dest).map_err(|e| {
        SeederError::Io(format!("Failed to create {}: {}", dest.display(), e))
    })?;
    fs::create_dir(&snapshot).map_err(|e| {
        SeederError::Io(format!(
            "Failed to create snapshot {}: {}",
            snapshot.display(),
            e
        ))
    })?;

    let copied_files = copy_files_flat(src, &snapshot)?;
    info!(
        "Backed up {} file(s) from {} to {}",
        copied_files.len(),
        src.display(),
        snapshot.display()
    );

    let pruned = match max_versions {
        Some(keep) if keep > 0 => prune_oldest(dest, keep)?,
        _ => Vec::new(),
    };

    Ok(SnapshotReport {
        snapshot,
        copied_files,
        pruned,
    })
}

/// Delete every entry of `dest` past the `keep` most recently modified
pub fn prune_oldest(dest: &Path, keep: usize) -> SeederResult<Vec<PathBuf>> {
    let mut entries: Vec<(PathBuf, SystemTime)> = Vec::new();

    for entry in fs::read_dir(dest).map_err(|e| {
        SeederError::Io(format!("Failed to read backup directory {}: {}", dest.display(), e))
    })? {
        let entry = entry?;
        let modified = entry.metadata()?.modified()?;
        entries.push((entry.path(), modified));
    }

    // Newest first
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let mut deleted = Vec::new();
    for (path, _) in entries.into_iter().skip(keep) {
        info!("Removing old backup: {}", path.display());
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| {
            SeederError::Io(format!("Failed to delete old backup {}: {}", path.display(), e))
        })?;
        deleted.push(path);
    }

    Ok(deleted)
}

/// List the snapshots directly under `dest`, newest first
///
/// Entries whose names are not snapshot timestamps are ignored.
pub fn list_snapshots(dest: &Path) -> SeederResult<Vec<SnapshotInfo>> {
    if !dest.exists() {
        return Ok(Vec::new());
    }

    let mut snapshots = Vec::new();
    for entry in fs::read_dir(dest)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(info) = parse_snapshot_info(&entry.path()) {
            snapshots.push(info);
        }
    }

    snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(snapshots)
}

fn parse_snapshot_info(path: &Path) -> Option<SnapshotInfo> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let created_at = parse_snapshot_timestamp(&name)?;

    let mut file_count = 0;
    let mut size_bytes = 0;
    for entry in fs::read_dir(path).ok()?.flatten() {
        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                file_count += 1;
                size_bytes += metadata.len();
            }
        }
    }

    Some(SnapshotInfo {
        name,
        path: path.to_path_buf(),
        created_at,
        file_count,
        size_bytes,
    })
}

/// Parse a snapshot folder name (`YYYYMMDDHHMMSS`)
pub fn parse_snapshot_timestamp(name: &str) -> Option<NaiveDateTime> {
    if name.len() != 14 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(name, SNAPSHOT_FORMAT).ok()
}

/// Backs up each configured game's data folder into its own snapshot series
///
/// Layout: `backup_path/backup_folder/<game_id>/<timestamp>/`.
pub struct BackupManager {
    backup_path: String,
    backup_folder: String,
    backup_root: PathBuf,
    userfolder_path: PathBuf,
    game_ids: Vec<String>,
    max_versions: Option<usize>,
}

impl BackupManager {
    /// Create a BackupManager from settings
    ///
    /// Fails when the configuration has no backup section.
    pub fn from_settings(settings: &Settings) -> SeederResult<Self> {
        let backup = settings.backup().ok_or_else(|| {
            SeederError::Config(
                "Backups are not configured (set backup_path and backup_folder)".into(),
            )
        })?;

        Ok(Self {
            backup_path: backup.backup_path.clone(),
            backup_folder: backup.backup_folder.clone(),
            backup_root: backup.backup_root(),
            userfolder_path: settings.userfolder_path(),
            game_ids: settings.game_ids().to_vec(),
            max_versions: backup.max_versions,
        })
    }

    /// Backup root directory
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Create the backup root if it does not exist yet
    pub fn ensure_root(&self) -> SeederResult<PathBuf> {
        create_backup_folder(&self.backup_path, &self.backup_folder)
    }

    /// Snapshot directory for one game
    pub fn game_dir(&self, game_id: &str) -> PathBuf {
        self.backup_root.join(game_id)
    }

    /// Snapshot one game's data folder
    ///
    /// Returns `None` when the game has no folder under the user folder.
    pub fn backup_game(&self, game_id: &str) -> SeederResult<Option<SnapshotReport>> {
        let source = self.userfolder_path.join(game_id);
        if !source.is_dir() {
            info!("Nothing to back up for {}: {} does not exist", game_id, source.display());
            return Ok(None);
        }

        let report = backup_files(&source, &self.game_dir(game_id), self.max_versions)?;
        if !report.pruned.is_empty() {
            debug!("Pruned {} old snapshot(s) for {}", report.pruned.len(), game_id);
        }
        Ok(Some(report))
    }

    /// Snapshot every configured game, stopping at the first error
    pub fn backup_all(&self) -> SeederResult<Vec<(String, Option<SnapshotReport>)>> {
        self.game_ids
            .iter()
            .map(|id| self.backup_game(id).map(|report| (id.clone(), report)))
            .collect()
    }

    /// Snapshots of one game, newest first
    pub fn list_game(&self, game_id: &str) -> SeederResult<Vec<SnapshotInfo>> {
        list_snapshots(&self.game_dir(game_id))
    }

    /// Configured game ids
    pub fn game_ids(&self) -> &[String] {
        &self.game_ids
    }
}
