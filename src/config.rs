use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment override for the missing-field policy
pub const MISSING_FIELD_ENV: &str = "BOOK_META_MISSING_FIELD";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// What to report when a document has no line for the requested field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Print an empty line and exit 0, like grep with no output
    #[default]
    Empty,
    /// Print "Field not found: <label>" and exit non-zero
    Error,
}

impl MissingFieldPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "empty" => Some(MissingFieldPolicy::Empty),
            "error" => Some(MissingFieldPolicy::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub missing_field: Option<MissingFieldPolicy>,
    pub log_level: Option<String>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("book-meta"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            let config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file with owner-only permissions (600)
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Config path has no parent directory"))?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, &content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600); // rw-------
            std::fs::set_permissions(path, perms)
                .with_context(|| "Failed to set config file permissions")?;
        }

        Ok(())
    }

    /// Policy from the environment, falling back to the file, then the default
    pub fn missing_field_policy(&self) -> MissingFieldPolicy {
        let from_env = std::env::var(MISSING_FIELD_ENV).ok();
        self.resolve_policy(from_env.as_deref())
    }

    fn resolve_policy(&self, from_env: Option<&str>) -> MissingFieldPolicy {
        if let Some(raw) = from_env {
            match MissingFieldPolicy::parse(raw) {
                Some(policy) => return policy,
                None => tracing::warn!(
                    value = raw,
                    "ignoring unrecognized {} value",
                    MISSING_FIELD_ENV
                ),
            }
        }
        self.missing_field.unwrap_or_default()
    }

    /// Filter directive for the log subscriber when RUST_LOG is unset
    pub fn log_filter(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
