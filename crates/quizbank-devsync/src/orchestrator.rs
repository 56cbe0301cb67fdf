//! Supervision of the watcher child process.
//!
//! The watcher runs as its own OS process, in its own process group, so a
//! crash on either side does not take the other down. One [`Orchestrator`]
//! owns at most one child at a time; `start` and `stop` are the only
//! operations that change it.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::OrchestratorError;

/// How to launch the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl WatcherCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// `<this executable> watch`.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?).arg("watch"))
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        // Own group, so teardown reaches whatever the watcher spawned.
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

impl fmt::Display for WatcherCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WatcherState {
    #[default]
    Idle,
    Starting,
    Running {
        pid: u32,
    },
    Stopping,
    /// The last start or stop failed. A later `start` retries.
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Spawned(u32),
    /// A child is already alive; nothing was spawned.
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    NotRunning,
    /// The child exited, either on the termination signal or before it.
    Exited(ExitStatus),
    /// The child ignored the termination signal and was force-killed.
    Killed,
}

/// Owner of the single watcher child process.
#[derive(Debug)]
pub struct Orchestrator {
    command: WatcherCommand,
    stop_timeout: Duration,
    child: Option<Child>,
    state: WatcherState,
}

impl Orchestrator {
    pub fn new(command: WatcherCommand, stop_timeout: Duration) -> Self {
        Self {
            command,
            stop_timeout,
            child: None,
            state: WatcherState::Idle,
        }
    }

    pub fn command(&self) -> &WatcherCommand {
        &self.command
    }

    pub fn state(&self) -> &WatcherState {
        &self.state
    }

    pub fn pid(&self) -> Option<u32> {
        match self.state {
            WatcherState::Running { pid } => Some(pid),
            _ => None,
        }
    }

    /// Whether a child is alive. Reaps a child that has exited on its own.
    pub fn is_running(&mut self) -> bool {
        self.reap();
        self.child.is_some()
    }

    /// Spawn the watcher unless one is already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Result<StartOutcome, OrchestratorError> {
        self.reap();
        if self.child.is_some() {
            debug!(pid = ?self.pid(), "Watcher already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        self.state = WatcherState::Starting;
        let spawned = self.command.to_command().spawn().and_then(|child| {
            child
                .id()
                .map(|pid| (child, pid))
                .ok_or_else(|| io::Error::other("watcher exited before its pid was known"))
        });

        match spawned {
            Ok((child, pid)) => {
                info!(pid, command = %self.command, "Watcher started");
                self.child = Some(child);
                self.state = WatcherState::Running { pid };
                Ok(StartOutcome::Spawned(pid))
            }
            Err(source) => {
                let err = OrchestratorError::Spawn {
                    program: self.command.program.to_string_lossy().into_owned(),
                    source,
                };
                self.state = WatcherState::Failed {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Terminate the watcher and wait for it, escalating to a forced kill
    /// once `stop_timeout` has passed.
    ///
    /// The whole process group is torn down, including members that outlive
    /// the watcher itself.
    pub async fn stop(&mut self) -> Result<StopOutcome, OrchestratorError> {
        let pid = self.pid();
        let Some(mut child) = self.child.take() else {
            self.state = WatcherState::Idle;
            return Ok(StopOutcome::NotRunning);
        };
        let Some(pid) = pid else {
            self.state = WatcherState::Idle;
            return Ok(StopOutcome::NotRunning);
        };

        self.state = WatcherState::Stopping;
        let result = match child.try_wait() {
            Ok(Some(status)) => {
                info!(pid, %status, "Watcher had already exited");
                self.clear_group(pid, Instant::now() + self.stop_timeout)
                    .await;
                Ok(StopOutcome::Exited(status))
            }
            _ => self.terminate(child, pid).await,
        };
        self.state = match &result {
            Ok(_) => WatcherState::Idle,
            Err(e) => WatcherState::Failed {
                reason: e.to_string(),
            },
        };
        result
    }

    async fn terminate(&self, mut child: Child, pid: u32) -> Result<StopOutcome, OrchestratorError> {
        debug!(pid, "Sending SIGTERM to watcher process group");
        if let Err(e) = signal_group(pid, false) {
            warn!(pid, error = %e, "Failed to signal process group, killing watcher directly");
            child
                .start_kill()
                .map_err(|source| OrchestratorError::Signal { pid, source })?;
        }

        let deadline = Instant::now() + self.stop_timeout;
        let outcome = match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => {
                info!(pid, %status, "Watcher stopped");
                StopOutcome::Exited(status)
            }
            Ok(Err(source)) => return Err(OrchestratorError::Wait { pid, source }),
            Err(_) => {
                warn!(
                    pid,
                    timeout_ms = self.stop_timeout.as_millis() as u64,
                    "Watcher did not exit in time, sending SIGKILL"
                );
                if let Err(e) = signal_group(pid, true) {
                    debug!(pid, error = %e, "Failed to SIGKILL process group");
                }
                // Already dead is fine here.
                let _ = child.start_kill();
                child
                    .wait()
                    .await
                    .map_err(|source| OrchestratorError::Wait { pid, source })?;
                StopOutcome::Killed
            }
        };

        // Members that ignored SIGTERM outlive the leader.
        if !wait_for_group(pid, deadline).await {
            let _ = signal_group(pid, true);
        }
        Ok(outcome)
    }

    /// SIGTERM whatever is left of a group whose leader is gone, then SIGKILL
    /// it at `deadline`.
    async fn clear_group(&self, pid: u32, deadline: Instant) {
        if !group_alive(pid) {
            return;
        }
        debug!(pid, "Watcher exited, terminating the rest of its process group");
        if let Err(e) = signal_group(pid, false) {
            debug!(pid, error = %e, "Failed to SIGTERM process group");
        }
        if !wait_for_group(pid, deadline).await {
            warn!(pid, "Process group outlived the watcher, sending SIGKILL");
            let _ = signal_group(pid, true);
        }
    }

    fn reap(&mut self) {
        let pid = self.pid();
        let Some(child) = self.child.as_mut() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                warn!(pid = ?pid, %status, "Watcher exited on its own");
                if let Some(pid) = pid {
                    clear_group_blocking(pid);
                }
                self.child = None;
                self.state = WatcherState::Idle;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to poll watcher status"),
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        // kill_on_drop only reaches the child itself, not its group. The
        // group may outlive a leader that already exited.
        if let (Some(_), Some(pid)) = (&self.child, self.pid()) {
            let _ = signal_group(pid, true);
        }
    }
}

/// Grace period for leftovers of a watcher that exited on its own.
const ORPHAN_GRACE: Duration = Duration::from_millis(200);
const GROUP_POLL: Duration = Duration::from_millis(20);

/// Wait until the group led by `pid` is empty. Returns false at `deadline`.
async fn wait_for_group(pid: u32, deadline: Instant) -> bool {
    loop {
        if !group_alive(pid) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(GROUP_POLL).await;
    }
}

/// Synchronous variant of [`Orchestrator::clear_group`] with a short grace
/// period, for callers that cannot await.
fn clear_group_blocking(pid: u32) {
    if !group_alive(pid) {
        return;
    }
    let _ = signal_group(pid, false);
    let deadline = std::time::Instant::now() + ORPHAN_GRACE;
    while group_alive(pid) {
        if std::time::Instant::now() >= deadline {
            warn!(pid, "Process group outlived the watcher, sending SIGKILL");
            let _ = signal_group(pid, true);
            return;
        }
        std::thread::sleep(GROUP_POLL);
    }
}

#[cfg(unix)]
fn process_group(pid: u32) -> io::Result<nix::unistd::Pid> {
    i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .map(nix::unistd::Pid::from_raw)
        .ok_or_else(|| io::Error::other(format!("invalid process group id {pid}")))
}

/// Signal the process group led by `pid`. A group that is already gone is
/// not an error.
#[cfg(unix)]
fn signal_group(pid: u32, force: bool) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};

    let signal = if force { Signal::SIGKILL } else { Signal::SIGTERM };
    match killpg(process_group(pid)?, signal) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(errno.into()),
    }
}

/// Whether any process is left in the group led by `pid`.
#[cfg(unix)]
fn group_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};

    match process_group(pid) {
        Ok(pgid) => !matches!(killpg(pgid, None::<Signal>), Err(Errno::ESRCH)),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn signal_group(_pid: u32, _force: bool) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "process groups are only supported on unix",
    ))
}

#[cfg(not(unix))]
fn group_alive(_pid: u32) -> bool {
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use sysinfo::{ProcessRefreshKind, System, UpdateKind};

    /// Live processes whose command line contains `marker`.
    fn count_processes(marker: &str) -> usize {
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessRefreshKind::new().with_cmd(UpdateKind::Always),
        );
        sys.processes()
            .values()
            .filter(|p| p.cmd().iter().any(|arg| arg == marker))
            .filter(|p| !matches!(p.status(), sysinfo::ProcessStatus::Zombie))
            .count()
    }

    fn sleeper(marker: &str) -> Orchestrator {
        Orchestrator::new(
            WatcherCommand::new("sleep").arg(marker),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let marker = "3601";
        let mut orchestrator = sleeper(marker);

        let first = orchestrator.start().unwrap();
        let StartOutcome::Spawned(pid) = first else {
            panic!("expected a spawn, got {first:?}");
        };
        assert_eq!(orchestrator.start().unwrap(), StartOutcome::AlreadyRunning);
        assert_eq!(orchestrator.state(), &WatcherState::Running { pid });
        assert_eq!(count_processes(marker), 1);

        orchestrator.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_leaves_no_process_behind() {
        let marker = "3602";
        let mut orchestrator = sleeper(marker);
        orchestrator.start().unwrap();
        assert!(orchestrator.is_running());
        assert_eq!(count_processes(marker), 1);

        let outcome = tokio::time::timeout(Duration::from_secs(2), orchestrator.stop())
            .await
            .expect("stop finishes within the bounded wait")
            .unwrap();

        assert!(matches!(outcome, StopOutcome::Exited(_)));
        assert_eq!(orchestrator.state(), &WatcherState::Idle);
        assert_eq!(orchestrator.pid(), None);
        assert_eq!(count_processes(marker), 0);
    }

    #[tokio::test]
    async fn test_stubborn_child_is_killed_after_timeout() {
        let marker = "3603";
        let mut orchestrator = Orchestrator::new(
            WatcherCommand::new("sh")
                .arg("-c")
                .arg(format!("trap '' TERM; sleep {marker}")),
            Duration::from_millis(200),
        );
        orchestrator.start().unwrap();
        // Let the shell install its trap first.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count_processes(marker), 1);

        let outcome = orchestrator.stop().await.unwrap();

        assert_eq!(outcome, StopOutcome::Killed);
        assert_eq!(count_processes(marker), 0);
    }

    /// A watcher whose shell exits at once, leaving `sleep <marker>` behind
    /// in its process group.
    fn orphaning(marker: &str) -> Orchestrator {
        Orchestrator::new(
            WatcherCommand::new("sh")
                .arg("-c")
                .arg(format!("sleep {marker} & exit 0")),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_stop_clears_group_after_leader_exited() {
        let marker = "3605";
        let mut orchestrator = orphaning(marker);
        orchestrator.start().unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count_processes(marker), 1);

        let outcome = orchestrator.stop().await.unwrap();

        assert!(matches!(outcome, StopOutcome::Exited(_)));
        assert_eq!(orchestrator.state(), &WatcherState::Idle);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count_processes(marker), 0);
    }

    #[tokio::test]
    async fn test_reaping_exited_leader_clears_group() {
        let marker = "3606";
        let mut orchestrator = orphaning(marker);
        orchestrator.start().unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count_processes(marker), 1);

        assert!(!orchestrator.is_running());
        assert_eq!(orchestrator.state(), &WatcherState::Idle);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count_processes(marker), 0);
    }

    #[tokio::test]
    async fn test_stop_without_child_is_a_no_op() {
        let mut orchestrator = sleeper("3604");
        assert_eq!(orchestrator.stop().await.unwrap(), StopOutcome::NotRunning);
        assert_eq!(orchestrator.state(), &WatcherState::Idle);
    }

    #[tokio::test]
    async fn test_exited_child_is_reaped_before_restart() {
        let mut orchestrator =
            Orchestrator::new(WatcherCommand::new("true"), Duration::from_secs(2));

        let StartOutcome::Spawned(first) = orchestrator.start().unwrap() else {
            panic!("expected a spawn");
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!orchestrator.is_running());
        assert_eq!(orchestrator.state(), &WatcherState::Idle);

        let StartOutcome::Spawned(second) = orchestrator.start().unwrap() else {
            panic!("expected a second spawn");
        };
        assert_ne!(first, second);
        orchestrator.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_spawn_failure_is_reported_and_retryable() {
        let mut orchestrator = Orchestrator::new(
            WatcherCommand::new("/nonexistent/quizbank-watcher"),
            Duration::from_secs(2),
        );

        let err = orchestrator.start().unwrap_err();
        assert!(matches!(err, OrchestratorError::Spawn { .. }));
        assert!(matches!(orchestrator.state(), WatcherState::Failed { .. }));
        assert!(!orchestrator.is_running());

        // Still fails, but does not get stuck in Starting.
        assert!(orchestrator.start().is_err());
        assert!(matches!(orchestrator.state(), WatcherState::Failed { .. }));
    }

    #[test]
    fn test_command_display() {
        let command = WatcherCommand::new("quizbank").args(["watch", "--quiet"]);
        assert_eq!(command.to_string(), "quizbank watch --quiet");
    }
}
