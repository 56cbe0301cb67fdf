//! Development watcher configuration.
//!
//! # Environment Variables
//!
//! - `TYPEGEN_WATCH_PATHS`: comma separated source roots to watch (default: `crates/quizbank-models/src`)
//! - `TYPEGEN_COMMAND`: command that regenerates the client types
//!   (default: `cargo run --quiet -p quizbank-cli -- generate`)
//! - `TYPEGEN_DEBOUNCE_MS`: quiet period before a burst of changes triggers extraction (default: 300)
//! - `TYPEGEN_STOP_TIMEOUT_MS`: how long teardown waits before force-killing the watcher (default: 2000)

use std::path::PathBuf;
use std::time::Duration;

use crate::env_or;

pub const DEFAULT_WATCH_PATH: &str = "crates/quizbank-models/src";
pub const DEFAULT_EXTRACT_COMMAND: &str = "cargo run --quiet -p quizbank-cli -- generate";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 2000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevSyncConfig {
    /// Source roots whose changes trigger regeneration.
    pub watch_paths: Vec<PathBuf>,

    /// Program and arguments of the extraction command.
    pub extract_command: Vec<String>,

    pub debounce: Duration,

    /// Bounded wait between the termination signal and a forced kill.
    pub stop_timeout: Duration,
}

impl DevSyncConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let watch_paths = std::env::var("TYPEGEN_WATCH_PATHS")
            .map(|raw| parse_path_list(&raw))
            .ok()
            .filter(|paths| !paths.is_empty())
            .unwrap_or_else(|| vec![PathBuf::from(DEFAULT_WATCH_PATH)]);

        let extract_command = std::env::var("TYPEGEN_COMMAND")
            .map(|raw| parse_command(&raw))
            .ok()
            .filter(|cmd| !cmd.is_empty())
            .unwrap_or_else(|| parse_command(DEFAULT_EXTRACT_COMMAND));

        Self {
            watch_paths,
            extract_command,
            debounce: Duration::from_millis(env_or("TYPEGEN_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)),
            stop_timeout: Duration::from_millis(env_or(
                "TYPEGEN_STOP_TIMEOUT_MS",
                DEFAULT_STOP_TIMEOUT_MS,
            )),
        }
    }
}

impl Default for DevSyncConfig {
    fn default() -> Self {
        Self {
            watch_paths: vec![PathBuf::from(DEFAULT_WATCH_PATH)],
            extract_command: parse_command(DEFAULT_EXTRACT_COMMAND),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            stop_timeout: Duration::from_millis(DEFAULT_STOP_TIMEOUT_MS),
        }
    }
}

/// Split a comma separated list of paths, dropping empty entries.
pub fn parse_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Split a command line on whitespace. Quoting is not supported.
pub fn parse_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
