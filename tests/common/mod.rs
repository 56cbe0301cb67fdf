use std::path::Path;

use quizbank::config::TypegenConfig;
use tempfile::TempDir;

/// A typegen config writing into a fresh temporary directory. Keep the
/// returned `TempDir` alive for as long as the output is needed.
#[allow(dead_code)]
pub fn temp_output() -> (TempDir, TypegenConfig) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = TypegenConfig::default().with_output_path(dir.path().join("generated.d.ts"));
    (dir, config)
}

#[allow(dead_code)]
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read generated file")
}

/// Body of `export type <name> = ...;` in `output`, without the keyword.
#[allow(dead_code)]
pub fn type_body<'a>(output: &'a str, name: &str) -> Option<&'a str> {
    let start = output.find(&format!("export type {name} = "))?;
    let rest = &output[start..];
    let end = [rest.find(";\n    export type "), rest.find(";\n}")]
        .into_iter()
        .flatten()
        .min()?;
    Some(&rest[..end])
}

/// Live, non-zombie processes whose argv contains `marker`.
#[allow(dead_code)]
pub fn count_processes(marker: &str) -> usize {
    use sysinfo::{ProcessRefreshKind, System, UpdateKind};

    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_cmd(UpdateKind::Always));
    sys.processes()
        .values()
        .filter(|p| p.cmd().iter().any(|arg| arg == marker))
        .filter(|p| !matches!(p.status(), sysinfo::ProcessStatus::Zombie))
        .count()
}

/// A `sleep` duration no other test in this binary uses, so parallel tests
/// never count each other's children.
#[allow(dead_code)]
pub fn unique_marker() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static NEXT: AtomicU32 = AtomicU32::new(7201);
    NEXT.fetch_add(1, Ordering::Relaxed).to_string()
}
