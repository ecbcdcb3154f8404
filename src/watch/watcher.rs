//! Watch loop
//!
//! A notify watcher pushes created directories into a bounded channel; a
//! single consumer drains it and runs the seeder on the blocking pool, one
//! event at a time, until the shutdown future resolves.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::event::CreateKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::handler::{ProfileSeeder, SeedOutcome};
use crate::config::Settings;
use crate::error::{SeederError, SeederResult};

/// Capacity of the queue between the notify thread and the consumer
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// Watches the root path and seeds every new profile folder
pub struct WatchLoop {
    seeder: ProfileSeeder,
    watch_path: PathBuf,
}

impl WatchLoop {
    /// Create a watch loop over the configured root path
    pub fn new(settings: Arc<Settings>) -> Self {
        let watch_path = settings.root_path().to_path_buf();
        Self {
            seeder: ProfileSeeder::new(settings),
            watch_path,
        }
    }

    /// Directory being watched (recursively)
    pub fn watch_path(&self) -> &Path {
        &self.watch_path
    }

    /// Run until Ctrl-C
    pub async fn run(&self) -> SeederResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Run until `shutdown` resolves
    pub async fn run_until<F>(&self, shutdown: F) -> SeederResult<()>
    where
        F: Future<Output = ()>,
    {
        if !self.watch_path.is_dir() {
            return Err(SeederError::NotFound {
                entity_type: "Watch directory",
                identifier: self.watch_path.display().to_string(),
            });
        }

        let (tx, mut rx) = mpsc::channel::<PathBuf>(EVENT_QUEUE_CAPACITY);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for path in created_directories(&event) {
                        // Receiver gone means the loop has stopped
                        if tx.blocking_send(path).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!("Watch error: {}", e),
            },
            Config::default(),
        )?;

        watcher.watch(&self.watch_path, RecursiveMode::Recursive)?;
        info!("Watching {} for new profile folders", self.watch_path.display());

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping watcher");
                    break;
                }
                received = rx.recv() => match received {
                    Some(path) => self.dispatch(path).await,
                    None => break,
                },
            }
        }

        if let Err(e) = watcher.unwatch(&self.watch_path) {
            debug!("Unwatch failed: {}", e);
        }
        drop(watcher);

        Ok(())
    }

    async fn dispatch(&self, path: PathBuf) {
        let seeder = self.seeder.clone();
        let task = tokio::task::spawn_blocking(move || seeder.on_directory_created(&path));

        match task.await {
            Ok(Some(report)) => {
                for (game_id, outcome) in &report.outcomes {
                    debug!("{} -> {:?}", game_id, outcome);
                }
                info!(
                    "Seeded {}: {} copied, {} failed",
                    report.profile.display(),
                    report.copied_count(),
                    report.failed_count()
                );
                for (game_id, outcome) in &report.outcomes {
                    if let SeedOutcome::Failed { message } = outcome {
                        warn!("{} was not copied: {}", game_id, message);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => error!("Seeding task failed: {}", e),
        }
    }
}

/// Directories created by a notify event
///
/// Backends that report a generic create are checked against the disk.
pub fn created_directories(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(CreateKind::Folder) => event.paths.clone(),
        EventKind::Create(CreateKind::Any) | EventKind::Create(CreateKind::Other) => event
            .paths
            .iter()
            .filter(|p| p.is_dir())
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received interrupt");
}
