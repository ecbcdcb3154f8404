//! profile-seeder - seed new game-platform profiles with existing game data
//!
//! Watches a user-data root for newly created numeric folders (new account
//! profiles) and copies each configured game's data folder from an existing
//! user folder into them. Optionally keeps timestamped snapshots of the game
//! data with a retention limit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: INI parsing, config file location and validated settings
//! - `error`: Custom error types
//! - `fs_ops`: Directory copy helpers and path nesting checks
//! - `backup`: Snapshot creation, listing and retention
//! - `watch`: Profile seeding and the notify-driven watch loop
//! - `cli`: Command handlers for the binary
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use profile_seeder::config::Settings;
//! use profile_seeder::watch::WatchLoop;
//!
//! let settings = Arc::new(Settings::load("config.ini".as_ref())?);
//! WatchLoop::new(settings).run().await?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs_ops;
pub mod logging;
pub mod watch;

pub use error::{SeederError, SeederResult};
