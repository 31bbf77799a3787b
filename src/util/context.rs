//! Global context: working directory, home directory and verbosity.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::project::{find_manifest, ManifestError};

/// Environment variable overriding the edaflow home directory.
pub const HOME_ENV: &str = "EDAFLOW_HOME";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global edaflow data (~/.edaflow/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => directories::BaseDirs::new()
                .map(|b| b.home_dir().join(".edaflow"))
                .unwrap_or_else(|| PathBuf::from(".edaflow")),
        };

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Replace the edaflow home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the edaflow home directory (~/.edaflow/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Find Edaflow.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd)
    }

    /// Resolve a user-supplied manifest path against cwd.
    pub fn resolve_manifest(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(crate::util::fs::absolutize(&self.cwd, path)),
            None => Ok(self.find_manifest()?),
        }
    }
}
