//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management.

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::Settings;
use crate::error::SeederResult;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot every configured game's data folder now
    Create,

    /// List existing snapshots
    List {
        /// Only list snapshots of this game id
        #[arg(short, long)]
        game: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(settings: &Settings, cmd: BackupCommands) -> SeederResult<()> {
    let manager = BackupManager::from_settings(settings)?;

    match cmd {
        BackupCommands::Create => {
            manager.ensure_root()?;

            println!("Creating snapshots...");
            for (game_id, report) in manager.backup_all()? {
                match report {
                    Some(report) => {
                        println!(
                            "  {}: {} file(s) -> {}",
                            game_id,
                            report.copied_files.len(),
                            report.snapshot.display()
                        );
                        if !report.pruned.is_empty() {
                            println!("     pruned {} old snapshot(s)", report.pruned.len());
                        }
                    }
                    None => println!("  {}: no data folder, skipped", game_id),
                }
            }
        }

        BackupCommands::List { game, verbose } => {
            let game_ids: Vec<String> = match game {
                Some(id) => vec![id],
                None => manager.game_ids().to_vec(),
            };

            println!("Snapshots in {}", manager.backup_root().display());
            println!();

            let mut total = 0;
            for game_id in &game_ids {
                let snapshots = manager.list_game(game_id)?;
                total += snapshots.len();

                println!("{} ({} snapshot(s))", game_id, snapshots.len());
                for (i, snapshot) in snapshots.iter().enumerate() {
                    if verbose {
                        println!(
                            "  {}. {}\n     Taken: {}\n     Files: {}\n     Size: {}\n     Path: {}",
                            i + 1,
                            snapshot.name,
                            snapshot.created_at.format("%Y-%m-%d %H:%M:%S"),
                            snapshot.file_count,
                            format_size(snapshot.size_bytes),
                            snapshot.path.display(),
                        );
                    } else {
                        println!(
                            "  {}. {} ({} file(s), {})",
                            i + 1,
                            snapshot.name,
                            snapshot.file_count,
                            format_size(snapshot.size_bytes),
                        );
                    }
                }
            }

            println!();
            println!("Total: {} snapshot(s)", total);
        }
    }

    Ok(())
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
