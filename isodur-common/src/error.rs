use std::path::PathBuf;
use thiserror::Error;

/// Main error type for isodur operations
#[derive(Error, Debug)]
pub enum IsodurError {
    #[error("Duration error: {0}")]
    Duration(#[from] DurationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid human-readable duration: {0}")]
    Human(#[from] humantime::DurationError),
}

/// Errors returned when parsing an ISO 8601 duration string.
///
/// Months are reported separately from malformed input so callers can tell
/// an unsupported feature apart from text that is not a duration at all.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    #[error("bad ISO 8601 duration format")]
    BadFormat,

    #[error("month designator is not supported in ISO 8601 durations")]
    NoMonth,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {path:?}")]
    FileRead { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse TOML configuration: {message}")]
    TomlParse { message: String },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },

    #[error("Unknown duration alias: {name}")]
    UnknownAlias { name: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, IsodurError>;

impl From<toml::de::Error> for IsodurError {
    fn from(err: toml::de::Error) -> Self {
        IsodurError::Config(ConfigError::TomlParse {
            message: err.to_string(),
        })
    }
}

// Error reporting utilities
pub trait ErrorReporting {
    fn log_error(&self, context: &str);
    fn user_friendly_message(&self) -> String;
}

impl ErrorReporting for IsodurError {
    fn log_error(&self, context: &str) {
        log::error!("{}: {:?}", context, self);
    }

    fn user_friendly_message(&self) -> String {
        match self {
            IsodurError::Duration(DurationError::NoMonth) => {
                "Months are not supported; express the duration in years, weeks or days instead."
                    .to_string()
            }
            IsodurError::Duration(DurationError::BadFormat) => {
                "Not a valid ISO 8601 duration (expected something like P1Y2DT3H4M5S or P1W)."
                    .to_string()
            }
            IsodurError::Config(ConfigError::FileRead { path, .. }) => {
                format!("Configuration file not found: {:?}", path)
            }
            IsodurError::Config(ConfigError::TomlParse { message }) => {
                format!("Invalid configuration format: {}", message)
            }
            IsodurError::Config(ConfigError::UnknownAlias { name }) => {
                format!("No duration alias named '{}' is configured", name)
            }
            _ => self.to_string(),
        }
    }
}
