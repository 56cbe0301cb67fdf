//! Development/production mode switch.

use std::fmt;
use std::str::FromStr;

/// Which kind of build session is running.
///
/// The watcher is only started in [`AppMode::Development`]. Production
/// builds regenerate client types once, offline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application mode '{0}' (expected development or production)")]
pub struct ParseModeError(pub String);

impl AppMode {
    /// Reads `APP_ENV`. Unset or unrecognised values mean development.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("APP_ENV")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl FromStr for AppMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("development".parse(), Ok(AppMode::Development));
        assert_eq!("DEV".parse(), Ok(AppMode::Development));
        assert_eq!("production".parse(), Ok(AppMode::Production));
        assert_eq!(" prod ".parse(), Ok(AppMode::Production));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "staging".parse::<AppMode>(),
            Err(ParseModeError("staging".to_string()))
        );
    }

    #[test]
    fn test_default_is_development() {
        assert!(AppMode::default().is_development());
        assert!(!AppMode::Production.is_development());
    }
}
