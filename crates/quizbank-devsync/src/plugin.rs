//! Build-tool lifecycle hooks.

use std::io;

use quizbank_config::{AppMode, DevSyncConfig};
use tracing::{error, info, warn};

use crate::orchestrator::{Orchestrator, StartOutcome, StopOutcome, WatcherCommand};

/// Starts the watcher when a development build session begins and tears it
/// down when the session ends.
///
/// Neither hook fails: problems are logged and the build carries on without
/// live type regeneration.
#[derive(Debug)]
pub struct DevSyncPlugin {
    mode: AppMode,
    orchestrator: Orchestrator,
}

impl DevSyncPlugin {
    pub fn new(mode: AppMode, orchestrator: Orchestrator) -> Self {
        Self { mode, orchestrator }
    }

    /// Mode from `APP_ENV`, watcher launched as `<this executable> watch`.
    pub fn from_env() -> io::Result<Self> {
        let config = DevSyncConfig::from_env();
        let command = WatcherCommand::current_exe()?;
        Ok(Self::new(
            AppMode::from_env(),
            Orchestrator::new(command, config.stop_timeout),
        ))
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator {
        &mut self.orchestrator
    }

    pub fn on_build_start(&mut self) {
        if !self.mode.is_development() {
            info!(mode = %self.mode, "Not a development build; type watcher not started");
            return;
        }

        match self.orchestrator.start() {
            Ok(StartOutcome::Spawned(pid)) => info!(pid, "Type watcher running"),
            Ok(StartOutcome::AlreadyRunning) => {}
            Err(e) => error!(
                error = %e,
                "Type watcher failed to start; client types will not regenerate automatically"
            ),
        }
    }

    pub async fn on_build_end(&mut self) {
        match self.orchestrator.stop().await {
            Ok(StopOutcome::NotRunning) => {}
            Ok(StopOutcome::Exited(status)) => info!(%status, "Type watcher stopped"),
            Ok(StopOutcome::Killed) => warn!("Type watcher had to be killed"),
            Err(e) => error!(error = %e, "Failed to stop type watcher"),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::orchestrator::WatcherState;
    use std::time::Duration;

    fn plugin(mode: AppMode) -> DevSyncPlugin {
        DevSyncPlugin::new(
            mode,
            Orchestrator::new(
                WatcherCommand::new("sleep").arg("3611"),
                Duration::from_secs(2),
            ),
        )
    }

    #[tokio::test]
    async fn test_production_never_spawns() {
        let mut plugin = plugin(AppMode::Production);

        plugin.on_build_start();

        assert_eq!(plugin.orchestrator().state(), &WatcherState::Idle);
        assert!(!plugin.orchestrator_mut().is_running());
        plugin.on_build_end().await;
    }

    #[tokio::test]
    async fn test_development_session_lifecycle() {
        let mut plugin = plugin(AppMode::Development);

        plugin.on_build_start();
        let pid = plugin.orchestrator().pid();
        assert!(pid.is_some());

        // A rebuild inside the same session keeps the same watcher.
        plugin.on_build_start();
        assert_eq!(plugin.orchestrator().pid(), pid);

        plugin.on_build_end().await;
        assert_eq!(plugin.orchestrator().state(), &WatcherState::Idle);
    }

    #[tokio::test]
    async fn test_spawn_failure_does_not_propagate() {
        let mut plugin = DevSyncPlugin::new(
            AppMode::Development,
            Orchestrator::new(
                WatcherCommand::new("/nonexistent/quizbank"),
                Duration::from_secs(2),
            ),
        );

        plugin.on_build_start();
        assert!(matches!(
            plugin.orchestrator().state(),
            WatcherState::Failed { .. }
        ));
        plugin.on_build_end().await;
    }
}
