//! Output configuration for generated client types.

use std::path::PathBuf;

/// Default location of the generated declaration file, relative to the
/// repository root.
pub const DEFAULT_OUTPUT_PATH: &str = "frontend/src/types/generated.d.ts";

/// Where extraction writes its output.
///
/// # Environment Variables
///
/// - `TYPEGEN_OUTPUT`: path of the generated file (default: `frontend/src/types/generated.d.ts`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypegenConfig {
    pub output_path: PathBuf,
}

impl TypegenConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            output_path: std::env::var("TYPEGEN_OUTPUT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}
