//! Backend trait definition and result types.
//!
//! The Backend trait defines the lifecycle every toolchain backend follows:
//! `configure` writes the artifacts, `build` runs the generated pipeline and
//! `done` reports where the output went.

use std::path::PathBuf;

use serde::Serialize;

use crate::backend::error::BackendError;
use crate::backend::registry::BackendId;
use crate::core::BuildIdentity;
use crate::util::hash::Fingerprint;

/// Arguments passed to every lifecycle operation.
#[derive(Debug, Clone, Default)]
pub struct BackendArgs {
    /// Echo tool output at info level
    pub verbose: bool,

    /// Extra arguments appended to the pipeline runner (e.g. `-j4`)
    pub runner_args: Vec<String>,
}

impl BackendArgs {
    /// Create empty arguments.
    pub fn new() -> Self {
        BackendArgs::default()
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Append runner arguments.
    pub fn with_runner_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.runner_args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// A file written during configure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    /// Path to the artifact
    pub path: PathBuf,

    /// SHA-256 of the written contents
    pub sha256: String,
}

/// Result of the configure phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigureResult {
    /// Artifacts in the order they were written
    pub artifacts: Vec<GeneratedArtifact>,
}

impl ConfigureResult {
    /// Combined digest of every artifact path and content.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        for artifact in &self.artifacts {
            fp.update_str(&artifact.path.to_string_lossy())
                .update_str(&artifact.sha256);
        }
        fp.finish()
    }
}

/// Result of the build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Final artifact the pipeline produces
    pub output: PathBuf,
}

/// Backend trait - interface for toolchain backends.
pub trait Backend: Send + Sync {
    /// Backend identifier.
    fn id(&self) -> BackendId;

    /// Identity of the build this backend was created for.
    fn identity(&self) -> &BuildIdentity;

    /// Write every artifact the pipeline needs into the work root.
    ///
    /// Writes are not transactional: a failed configure may leave some
    /// artifacts behind.
    fn configure(&self, args: &BackendArgs) -> Result<ConfigureResult, BackendError>;

    /// Run the generated pipeline and block until it exits.
    fn build(&self, args: &BackendArgs) -> Result<BuildResult, BackendError>;

    /// Post-build notification.
    fn done(&self, args: &BackendArgs);

    /// Remove derived artifacts through the pipeline's clean rule.
    fn clean(&self, args: &BackendArgs) -> Result<(), BackendError>;

    /// Every file this backend writes or the pipeline produces.
    ///
    /// All paths are inside the work root. Nothing else is ever removed on
    /// the backend's behalf.
    fn generated_files(&self) -> Vec<PathBuf>;
}
