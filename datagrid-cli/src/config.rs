//! Configuration file.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use griddom::Rect;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use url::Url;

use crate::cli::Overrides;
use crate::paths;

/// Errors loading or using the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No {0} configured; set it in the config file or pass --{0}")]
    Missing(&'static str),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page URL the grid lives on.
    pub base_url: Option<String>,
    /// Element id of the grid.
    pub grid_id: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Connection timeout.
    pub connect_timeout_secs: u64,
    pub viewport_width: i32,
    pub viewport_height: i32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            grid_id: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            viewport_width: 1024,
            viewport_height: 768,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match paths::config_file() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.url {
            self.base_url = Some(url.clone());
        }
        if let Some(grid) = &overrides.grid {
            self.grid_id = Some(grid.clone());
        }
        if let Some(width) = overrides.width {
            self.viewport_width = width;
        }
        if let Some(height) = overrides.height {
            self.viewport_height = height;
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn location(&self) -> Result<Url, ConfigError> {
        let url = self.base_url.as_deref().ok_or(ConfigError::Missing("url"))?;
        Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        })
    }

    pub fn grid_id(&self) -> Result<&str, ConfigError> {
        self.grid_id.as_deref().ok_or(ConfigError::Missing("grid"))
    }

    pub fn viewport(&self) -> Rect {
        Rect::from_size(self.viewport_width, self.viewport_height)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
