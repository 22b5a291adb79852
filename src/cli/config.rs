//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::DEFAULT_ARCHIVE_PREFIX;
use crate::render::DEFAULT_MAX_DEPTH;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ZENDOWN_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default directory for exported files
    pub output_dir: Option<PathBuf>,

    /// Archive file name prefix
    pub archive_prefix: Option<String>,

    /// Maximum HTML element nesting
    pub max_depth: Option<usize>,

    /// Custom template for raw HTML exports
    pub html_template: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$ZENDOWN_CONFIG` if set, else `~/.config/zendown/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zendown")
            .join("config.toml")
    }

    /// Resolve the output directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--output` argument
    /// 2. Config file `output_dir` setting
    /// 3. Current working directory
    pub fn output_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the nesting limit, with CLI argument taking precedence.
    pub fn max_depth(&self, cli_max_depth: Option<usize>) -> usize {
        cli_max_depth
            .or(self.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Archive file name prefix.
    pub fn archive_prefix(&self) -> &str {
        self.archive_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or(DEFAULT_ARCHIVE_PREFIX)
    }

    /// Resolve the raw HTML template path, with CLI argument taking
    /// precedence.
    pub fn html_template(&self, cli_template: Option<&PathBuf>) -> Option<PathBuf> {
        cli_template.cloned().or_else(|| self.html_template.clone())
    }
}
