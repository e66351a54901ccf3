//! Configuration loading from `.repographrc.toml`.
//!
//! Configuration is optional - repograph uses the standard input extension
//! and table names if no config file exists. Command-line flags override
//! anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! extension = "csv"
//!
//! [output]
//! users = "users.csv"
//! repos = "repos.csv"
//! memberships = "memberships.csv"
//! ownerships = "ownerships.csv"
//! format = "table"
//! color = true
//! ```

use anyhow::{Context, Result};
use repograph_core::{OutputLayout, DEFAULT_EXTENSION};
use serde::Deserialize;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".repographrc.toml";

/// Root configuration structure loaded from `.repographrc.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RepographConfig {
    /// Source discovery settings.
    #[serde(default)]
    pub input: InputSettings,

    /// Output table names and console preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Source discovery settings.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InputSettings {
    /// Extension of source files, without the dot.
    ///
    /// Default: `csv`
    #[serde(default)]
    pub extension: Option<String>,
}

/// Output settings.
///
/// Table names are relative to the output directory.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(default)]
    pub users: Option<String>,
    #[serde(default)]
    pub repos: Option<String>,
    #[serde(default)]
    pub memberships: Option<String>,
    #[serde(default)]
    pub ownerships: Option<String>,

    /// Default summary format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output.
    ///
    /// Defaults to auto-detection when unset.
    #[serde(default)]
    pub color: Option<bool>,
}

impl RepographConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields defaults. A file that cannot be read or parsed
    /// is an error when `strict` is set; otherwise it is logged as a
    /// warning and defaults are used.
    pub fn load(path: &Path, strict: bool) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::read(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) if strict => Err(e),
            Err(e) => {
                tracing::warn!("{:#}", e);
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Source file extension, defaulting to `csv`.
    pub fn extension(&self) -> &str {
        self.input.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    /// Output table names, with defaults for anything not configured.
    pub fn layout(&self) -> OutputLayout {
        let defaults = OutputLayout::default();
        let out = &self.output;
        OutputLayout {
            users: out.users.clone().unwrap_or(defaults.users),
            repos: out.repos.clone().unwrap_or(defaults.repos),
            memberships: out.memberships.clone().unwrap_or(defaults.memberships),
            ownerships: out.ownerships.clone().unwrap_or(defaults.ownerships),
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
