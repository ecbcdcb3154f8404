//! Watch and seed commands

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::backup::BackupManager;
use crate::config::Settings;
use crate::error::{SeederError, SeederResult};
use crate::watch::{ProfileSeeder, SeedOutcome, WatchLoop};

/// Run the watch loop until interrupted
///
/// With backups configured, the backup folder is created and every game is
/// snapshotted before watching starts.
pub async fn handle_watch_command(settings: Arc<Settings>) -> SeederResult<()> {
    if settings.backup().is_some() {
        log_configuration(&settings);

        let taken = take_startup_snapshots(&settings).await?;
        info!("Took {} startup snapshot(s)", taken);
    }

    WatchLoop::new(settings).run().await
}

/// Create the backup root and snapshot every game on the blocking pool
///
/// Returns the number of snapshots taken.
pub async fn take_startup_snapshots(settings: &Settings) -> SeederResult<usize> {
    let manager = BackupManager::from_settings(settings)?;

    tokio::task::spawn_blocking(move || -> SeederResult<usize> {
        manager.ensure_root()?;
        let snapshots = manager.backup_all()?;
        Ok(snapshots.iter().filter(|(_, r)| r.is_some()).count())
    })
    .await
    .map_err(|e| SeederError::Io(format!("Startup backup task failed: {}", e)))?
}

/// Seed an existing folder once, as if it had just been created
pub fn handle_seed_command(settings: Arc<Settings>, folder: &Path) -> SeederResult<()> {
    if !folder.is_dir() {
        return Err(SeederError::NotFound {
            entity_type: "Profile folder",
            identifier: folder.display().to_string(),
        });
    }

    let report = ProfileSeeder::new(settings).seed(folder);

    println!("Seeded {}", report.profile.display());
    for (game_id, outcome) in &report.outcomes {
        let status = match outcome {
            SeedOutcome::Copied { files } => format!("copied {} file(s)", files),
            SeedOutcome::Recursive => "skipped (destination inside source)".to_string(),
            SeedOutcome::MissingSource => "skipped (no data folder)".to_string(),
            SeedOutcome::Failed { message } => format!("failed: {}", message),
        };
        println!("  {}: {}", game_id, status);
    }

    if report.failed_count() > 0 {
        return Err(SeederError::Io(format!(
            "{} game folder(s) could not be copied",
            report.failed_count()
        )));
    }

    Ok(())
}

fn log_configuration(settings: &Settings) {
    info!("Path: {}", settings.root_path().display());
    info!("User folder: {}", settings.userfolder_path().display());
    info!("Game IDs: {}", settings.game_ids().join(", "));
    if let Some(backup) = settings.backup() {
        info!("Backup folder: {}", backup.backup_root().display());
        match backup.max_versions {
            Some(n) => info!("Max versions: {}", n),
            None => info!("Max versions: unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_startup_snapshots() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("userdata");
        fs::create_dir_all(root.join("u1").join("220")).unwrap();
        fs::write(root.join("u1").join("220").join("cfg.txt"), "x").unwrap();
        let settings = Settings::parse(&format!(
            "path = {}\nuserfolder = u1\ngame_ids = 220,730\nbackup_path = {}\nbackup_folder = snapshots\n",
            root.display(),
            temp.path().join("backups").display()
        ))
        .unwrap();

        // 730 has no data folder and is skipped
        assert_eq!(take_startup_snapshots(&settings).await.unwrap(), 1);

        let series = temp.path().join("backups").join("snapshots").join("220");
        assert_eq!(fs::read_dir(series).unwrap().count(), 1);
    }
}
