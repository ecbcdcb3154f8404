//! Show the resolved configuration

use std::path::Path;

use crate::config::Settings;
use crate::error::SeederResult;

/// Print the configuration, either as text or as JSON
pub fn handle_config_command(config_file: &Path, settings: &Settings, json: bool) -> SeederResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    println!("profile-seeder Configuration");
    println!("============================");
    println!("Config file:  {}", config_file.display());
    println!("Watched path: {}", settings.root_path().display());
    println!("User folder:  {}", settings.userfolder_path().display());
    println!("Game IDs:     {}", settings.game_ids().join(", "));
    println!();

    match settings.backup() {
        Some(backup) => {
            println!("Backups:      enabled");
            println!("Backup root:  {}", backup.backup_root().display());
            println!(
                "Max versions: {}",
                backup
                    .max_versions
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "unlimited".to_string())
            );
        }
        None => println!("Backups:      disabled"),
    }

    Ok(())
}
