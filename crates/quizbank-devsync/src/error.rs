use std::io;
use std::path::PathBuf;

/// Failure to control the watcher child process.
///
/// None of these are fatal to the build session hosting the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("failed to spawn watcher `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to signal watcher (pid {pid}): {source}")]
    Signal {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for watcher (pid {pid}): {source}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },
}

/// Failure inside the watcher process itself.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("no source paths to watch")]
    NoWatchPaths,

    #[error("extraction command is empty")]
    EmptyCommand,

    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error(transparent)]
    Notify(#[from] notify::Error),

    #[error("failed to run extraction command `{command}`: {source}")]
    Extract {
        command: String,
        #[source]
        source: io::Error,
    },
}
