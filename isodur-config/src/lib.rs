use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use isodur_common::{error::ConfigError, IsoDuration, IsodurError, Result};

/// How the CLI renders an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Iso,
    Human,
    Seconds,
    Nanos,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Human
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Iso => write!(f, "iso"),
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Seconds => write!(f, "seconds"),
            OutputFormat::Nanos => write!(f, "nanos"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub aliases: BTreeMap<String, IsoDuration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default = "default_duration")]
    pub default: IsoDuration,
}

fn default_duration() -> IsoDuration {
    IsoDuration {
        minutes: 5,
        ..IsoDuration::default()
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            default: default_duration(),
        }
    }
}

impl Config {
    /// Loads the default config file, falling back to defaults when it does
    /// not exist.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            log::debug!("No config file at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IsodurError::Config(ConfigError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
            }));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| IsodurError::Config(ConfigError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        log::info!(
            "Loaded config from {:?} ({} aliases, output = {})",
            path,
            config.aliases.len(),
            config.global.output
        );
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IsodurError::Config(ConfigError::NoConfigDir))?
            .join("isodur");

        Ok(config_dir.join("config.toml"))
    }

    /// Looks up an alias by name, or parses `input` as a literal duration.
    pub fn resolve(&self, input: &str) -> Result<IsoDuration> {
        let trimmed = input.trim();
        if let Some(duration) = self.aliases.get(trimmed) {
            log::debug!("Resolved alias '{}' to {}", trimmed, duration);
            return Ok(*duration);
        }

        if trimmed.starts_with('P') {
            return Ok(isodur_common::parse(trimmed)?);
        }

        Err(IsodurError::Config(ConfigError::UnknownAlias {
            name: trimmed.to_string(),
        }))
    }

    pub fn validate(&self) -> Result<()> {
        for name in self.aliases.keys() {
            validate_alias_name(name)?;
        }

        if self.global.default.is_zero() {
            log::warn!("global.default is an empty duration");
        }

        Ok(())
    }
}

fn validate_alias_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IsodurError::Config(ConfigError::Validation {
            message: "alias name cannot be empty".to_string(),
        }));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(IsodurError::Config(ConfigError::Validation {
            message: format!("alias '{}' contains whitespace", name),
        }));
    }

    // Would shadow literal durations in `resolve`.
    if name.starts_with('P') {
        return Err(IsodurError::Config(ConfigError::Validation {
            message: format!("alias '{}' must not start with 'P'", name),
        }));
    }

    Ok(())
}

mod alias_tests;
