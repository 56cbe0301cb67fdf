//! # Quizbank Config
//!
//! Configuration types for type generation and the development watcher,
//! loaded from environment variables:
//!
//! - [`mode`]: development/production switch (`APP_ENV`)
//! - [`typegen`]: output location of the generated client types
//! - [`devsync`]: watcher paths, extraction command and timings
//!
//! # Example
//!
//! ```ignore
//! use quizbank_config::{AppMode, DevSyncConfig, TypegenConfig};
//!
//! let mode = AppMode::from_env();
//! let typegen = TypegenConfig::from_env();
//! let devsync = DevSyncConfig::from_env();
//! ```

pub mod devsync;
pub mod mode;
pub mod typegen;

pub use devsync::DevSyncConfig;
pub use mode::{AppMode, ParseModeError};
pub use typegen::TypegenConfig;

/// Read an environment variable and parse it, falling back to `default` when
/// it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
