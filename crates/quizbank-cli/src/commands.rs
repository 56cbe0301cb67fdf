use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use quizbank_config::{DevSyncConfig, TypegenConfig};
use quizbank_devsync::{DevSyncPlugin, SourceWatcher};
use quizbank_models::registry;
use quizbank_typegen::{Declaration, Registry};
use tracing::{info, warn};

/// Exit code when the file was written but some declarations were left out.
pub const PARTIAL_FAILURE: u8 = 2;

/// Extract the registry once and write the declaration file.
pub fn generate(output: Option<PathBuf>) -> Result<ExitCode> {
    let mut config = TypegenConfig::from_env();
    if let Some(path) = output {
        config = config.with_output_path(path);
    }
    generate_with(&registry(), &config)
}

pub fn generate_with(registry: &Registry, config: &TypegenConfig) -> Result<ExitCode> {
    let summary = quizbank_typegen::generate(registry, config);
    summary
        .write
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    if summary.report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!(
            failed = summary.report.failures().count(),
            "Some declarations were not exported"
        );
        Ok(ExitCode::from(PARTIAL_FAILURE))
    }
}

/// Watch sources until interrupted. This is the process the dev session
/// supervises.
pub async fn watch() -> Result<ExitCode> {
    let watcher = SourceWatcher::new(DevSyncConfig::from_env(), TypegenConfig::from_env().output_path);

    tokio::select! {
        result = watcher.run() => result.context("Type watcher stopped")?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted, stopping type watcher");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Host a development build session: start the watcher, then tear it down on
/// Ctrl-C.
pub async fn dev() -> Result<ExitCode> {
    let mut plugin = DevSyncPlugin::from_env().context("Failed to locate the quizbank executable")?;

    plugin.on_build_start();
    info!(mode = %plugin.mode(), "Development session running, press Ctrl-C to stop");

    let interrupted = tokio::signal::ctrl_c().await;
    plugin.on_build_end().await;
    interrupted.context("Failed to listen for Ctrl-C")?;

    Ok(ExitCode::SUCCESS)
}

/// Print every exported enumeration with its values, in registry order.
pub fn list_enums(out: &mut impl Write) -> Result<()> {
    for declaration in registry().declarations() {
        let Declaration::Enum(decl) = declaration else {
            continue;
        };
        writeln!(out, "{}.{}", decl.namespace, decl.name)?;
        for variant in &decl.variants {
            writeln!(out, "  {} = '{}'", variant.symbol, variant.value)?;
        }
    }
    Ok(())
}
