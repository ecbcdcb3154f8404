//! Reaction to a newly created profile folder
//!
//! For every configured game id the game's folder under the user folder is
//! merged into `<new profile>/<game_id>`. Failures are recorded per game id
//! and never stop the remaining copies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::fs_ops::{copy_tree_merge, is_nested_under};

/// What happened to one game id while seeding a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// The game folder was copied
    Copied { files: usize },
    /// The destination lies inside the source; nothing was copied
    Recursive,
    /// The game has no folder under the user folder
    MissingSource,
    /// The copy failed part-way
    Failed { message: String },
}

/// Per-game result of handling one profile folder
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// The profile folder that was seeded
    pub profile: PathBuf,
    /// Outcome per game id, in configuration order
    pub outcomes: Vec<(String, SeedOutcome)>,
}

impl SeedReport {
    /// Number of game ids that were copied
    pub fn copied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SeedOutcome::Copied { .. }))
            .count()
    }

    /// Number of game ids whose copy failed
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SeedOutcome::Failed { .. }))
            .count()
    }
}

/// Seeds new profile folders from the configured user folder
#[derive(Debug, Clone)]
pub struct ProfileSeeder {
    settings: Arc<Settings>,
}

impl ProfileSeeder {
    /// Create a seeder for the given settings
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Settings this seeder copies from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle a directory-creation notification
    ///
    /// Returns `None` when the folder is not a profile folder: its name is
    /// not all digits, or it is named after one of the configured games.
    pub fn on_directory_created(&self, new_folder: &Path) -> Option<SeedReport> {
        let name = new_folder.file_name()?.to_string_lossy();

        if !is_profile_name(&name) {
            debug!("Ignoring non-profile folder: {}", new_folder.display());
            return None;
        }

        if self.settings.game_ids().iter().any(|id| id.as_str() == name.as_ref()) {
            info!(
                "Skipping copying for existing game folder: {}",
                new_folder.display()
            );
            return None;
        }

        info!("New profile folder detected: {}", new_folder.display());
        Some(self.seed(new_folder))
    }

    /// Copy every configured game folder into `profile`
    pub fn seed(&self, profile: &Path) -> SeedReport {
        let userfolder_path = self.settings.userfolder_path();
        let outcomes = self
            .settings
            .game_ids()
            .iter()
            .map(|game_id| {
                let source = userfolder_path.join(game_id);
                let destination = profile.join(game_id);
                (game_id.clone(), seed_game(&source, &destination))
            })
            .collect();

        SeedReport {
            profile: profile.to_path_buf(),
            outcomes,
        }
    }
}

/// Copy one game folder, guarding against copying a folder into itself
pub fn seed_game(source: &Path, destination: &Path) -> SeedOutcome {
    if is_nested_under(destination, source) {
        info!(
            "Destination {} is inside source {}; skipping to prevent recursive copying",
            destination.display(),
            source.display()
        );
        return SeedOutcome::Recursive;
    }

    if !source.exists() {
        info!("Source game path does not exist: {}", source.display());
        return SeedOutcome::MissingSource;
    }

    info!("Copying from {} to {}", source.display(), destination.display());
    match copy_tree_merge(source, destination) {
        Ok(files) => SeedOutcome::Copied { files },
        Err(e) => {
            warn!("Error copying: {}", e);
            SeedOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// True for non-empty, all-digit folder names
pub fn is_profile_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
