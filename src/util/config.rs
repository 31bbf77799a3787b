//! Configuration file support for edaflow.
//!
//! edaflow supports two configuration file locations:
//! - Global: `~/.edaflow/config.toml` - User-wide defaults
//! - Project: `.edaflow/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [tools]
//! make = "/usr/bin/gmake"
//!
//! [build]
//! work-root = "out"
//! jobs = 4
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// edaflow configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool overrides
    pub tools: ToolsConfig,

    /// Build settings
    pub build: BuildConfig,
}

/// External tool overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Pipeline runner used instead of `make` from PATH
    pub make: Option<PathBuf>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Directory holding work roots, relative to the project root
    pub work_root: Option<PathBuf>,

    /// Parallel jobs passed to the pipeline runner as `-jN`
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.tools.make.is_some() {
            self.tools.make = other.tools.make;
        }
        if other.build.work_root.is_some() {
            self.build.work_root = other.build.work_root;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
    }

    /// Pipeline runner program.
    pub fn make_program(&self) -> PathBuf {
        self.tools
            .make
            .clone()
            .unwrap_or_else(|| PathBuf::from("make"))
    }

    /// Runner arguments implied by the config.
    pub fn runner_args(&self) -> Vec<String> {
        self.build
            .jobs
            .map(|jobs| vec![format!("-j{}", jobs)])
            .unwrap_or_default()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.edaflow/config.toml)
/// 2. Global config (~/.edaflow/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the project config path (.edaflow/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".edaflow").join("config.toml")
}
