use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use profile_seeder::cli::{
    handle_backup_command, handle_config_command, handle_seed_command, handle_watch_command,
    BackupCommands,
};
use profile_seeder::config::{paths::CONFIG_ENV_VAR, resolve_config_file, Settings};

#[derive(Parser)]
#[command(
    name = "profile-seeder",
    version,
    about = "Seed new game profiles with existing per-game data",
    long_about = "profile-seeder watches a user-data folder for newly created numeric \
                  profile folders and copies the configured games' data folders into \
                  them. It can also keep timestamped backups of that data."
)]
struct Cli {
    /// Configuration file (defaults to config.ini in the working directory)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch for new profile folders (default)
    Watch,

    /// Seed an existing folder once
    Seed {
        /// Profile folder to copy the game data into
        folder: PathBuf,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show the resolved configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    profile_seeder::logging::init(cli.verbose);

    let config_file = resolve_config_file(cli.config);
    let settings = Arc::new(Settings::load(&config_file)?);

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => handle_watch_command(settings).await?,
        Commands::Seed { folder } => handle_seed_command(settings, &folder)?,
        Commands::Backup(cmd) => handle_backup_command(&settings, cmd)?,
        Commands::Config { json } => handle_config_command(&config_file, &settings, json)?,
    }

    Ok(())
}
