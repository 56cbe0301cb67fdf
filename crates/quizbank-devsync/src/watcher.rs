//! The watcher process: file change detection feeding extraction runs.

use std::path::{Component, Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use quizbank_config::DevSyncConfig;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::WatchError;

/// Watches backend sources and re-runs extraction when they change.
#[derive(Debug, Clone)]
pub struct SourceWatcher {
    config: DevSyncConfig,
    output_path: PathBuf,
}

impl SourceWatcher {
    /// `output_path` is the generated file; changes to it never trigger a run.
    pub fn new(config: DevSyncConfig, output_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_path: output_path.into(),
        }
    }

    /// Whether a change to `path` should trigger extraction.
    pub fn is_relevant(&self, path: &Path) -> bool {
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            return false;
        }
        if path
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "target"))
        {
            return false;
        }
        !(path == self.output_path || path.ends_with(&self.output_path))
    }

    /// Run one extraction, then one more after every settled burst of
    /// relevant changes. Only returns on a setup error or when the
    /// file-system watcher goes away.
    pub async fn run(self) -> Result<(), WatchError> {
        if self.config.watch_paths.is_empty() {
            return Err(WatchError::NoWatchPaths);
        }
        if self.config.extract_command.is_empty() {
            return Err(WatchError::EmptyCommand);
        }

        let (tx, mut rx) = mpsc::channel::<Vec<PathBuf>>(256);
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        let _ = tx.blocking_send(event.paths);
                    }
                }
                Err(e) => error!("File watcher error: {}", e),
            }
        })?;

        for path in &self.config.watch_paths {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(|source| WatchError::Watch {
                    path: path.clone(),
                    source,
                })?;
            info!(path = %path.display(), "Watching for source changes");
        }

        self.extract_logged().await;

        while let Some(paths) = rx.recv().await {
            let Some(trigger) = paths.iter().find(|p| self.is_relevant(p)) else {
                continue;
            };
            debug!(path = %trigger.display(), "Source change detected");

            if !settle(&mut rx, self.config.debounce).await {
                break;
            }
            self.extract_logged().await;
        }

        info!("File watcher loop ended");
        Ok(())
    }

    /// Run the extraction command once with inherited output.
    pub async fn extract(&self) -> Result<ExitStatus, WatchError> {
        let Some((program, args)) = self.config.extract_command.split_first() else {
            return Err(WatchError::EmptyCommand);
        };
        Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| WatchError::Extract {
                command: self.config.extract_command.join(" "),
                source,
            })
    }

    async fn extract_logged(&self) {
        match self.extract().await {
            Ok(status) if status.success() => info!("Client types regenerated"),
            Ok(status) => warn!(%status, "Extraction command failed"),
            Err(e) => error!(error = %e, "Could not run extraction"),
        }
    }
}

/// Drain events until none arrive for `quiet`. Returns false once the
/// channel is closed.
async fn settle(rx: &mut mpsc::Receiver<Vec<PathBuf>>, quiet: Duration) -> bool {
    loop {
        match tokio::time::timeout(quiet, rx.recv()).await {
            Ok(Some(_)) => continue,
            Ok(None) => return false,
            Err(_) => return true,
        }
    }
}
