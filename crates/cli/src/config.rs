//! Configuration loading from radim-mcp.toml, the environment and flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use backend::{BackendConfig, ENV_BASE_URL, ENV_BASE_URL_LEGACY};
use serde::Deserialize;

/// Read from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "radim-mcp.toml";

/// Set to `1` for JSON log lines.
pub const ENV_LOG_JSON: &str = "RADIM_LOG_JSON";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub backend: BackendSection,
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BackendSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The explicit file if one was named, else [`CONFIG_FILE`] when it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE).map(Some),
            None => Ok(None),
        }
    }
}

/// Command-line overrides; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: BackendConfig,
    pub log: LogSettings,
}

impl Settings {
    /// Layer defaults, file, environment and flags, later wins.
    pub fn resolve(
        file: Option<FileConfig>,
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let mut backend = BackendConfig::default();
        let mut log = LogSettings::default();

        if let Some(url) = file.backend.base_url {
            backend.base_url = url;
        }
        if let Some(secs) = file.backend.timeout_secs {
            backend.timeout = Duration::from_secs(secs);
        }
        if let Some(level) = file.log.level {
            log.level = level;
        }
        if let Some(json) = file.log.json {
            log.json = json;
        }

        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_blank(ENV_BASE_URL).or_else(|| non_blank(ENV_BASE_URL_LEGACY)) {
            backend.base_url = url;
        }
        if let Some(flag) = non_blank(ENV_LOG_JSON) {
            log.json = flag.trim() == "1";
        }

        if let Some(url) = &overrides.base_url {
            backend.base_url = url.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            backend.timeout = Duration::from_secs(secs);
        }

        if backend.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { backend, log })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}
