//! Folder watching and profile seeding
//!
//! - `handler`: what to do with one newly created folder
//! - `watcher`: the notify-driven loop that feeds the handler

pub mod handler;
pub mod watcher;

pub use handler::{is_profile_name, seed_game, ProfileSeeder, SeedOutcome, SeedReport};
pub use watcher::{created_directories, shutdown_signal, WatchLoop};
