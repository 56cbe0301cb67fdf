//! # Quizbank DevSync
//!
//! Keeps the generated client types current while a frontend dev server is
//! running.
//!
//! - [`DevSyncPlugin`] is driven by the build session's start and end hooks.
//! - [`Orchestrator`] supervises the single watcher child process.
//! - [`SourceWatcher`] is what runs inside that child: it watches backend
//!   sources and re-runs extraction when they change.

pub mod error;
pub mod orchestrator;
pub mod plugin;
pub mod watcher;

pub use error::{OrchestratorError, WatchError};
pub use orchestrator::{Orchestrator, StartOutcome, StopOutcome, WatcherCommand, WatcherState};
pub use plugin::DevSyncPlugin;
pub use watcher::SourceWatcher;
