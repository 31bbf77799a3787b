//! Backend error types and diagnostics.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::registry::BackendId;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Lifecycle stage an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configure,
    Build,
    Clean,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Clean => "clean",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toolchain preconditions not met at configure time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("missing constraint file")]
    MissingConstraintFile,

    #[error("multiple constraint files: {}", files.join(", "))]
    MultipleConstraintFiles { files: Vec<String> },

    #[error("work root `{}` exists but is not a directory", path.display())]
    InvalidWorkRoot { path: PathBuf },
}

/// Failure of an external pipeline process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("failed to launch `{command}`: {reason}")]
    Launch { command: String, reason: String },

    #[error("`{command}` {}", describe_exit(*code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Error returned by the backend lifecycle operations.
///
/// The message always names the backend and the stage that failed.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{backend} configure failed: {error}")]
    Configuration {
        backend: BackendId,
        error: ConfigurationError,
    },

    #[error("{backend} {stage} failed: {error}")]
    Build {
        backend: BackendId,
        stage: Stage,
        error: BuildError,
    },

    #[error("{backend} {stage} failed: could not access `{}`", path.display())]
    Io {
        backend: BackendId,
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError {
    /// Backend that raised the error.
    pub fn backend(&self) -> BackendId {
        match self {
            BackendError::Configuration { backend, .. }
            | BackendError::Build { backend, .. }
            | BackendError::Io { backend, .. } => *backend,
        }
    }

    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            BackendError::Configuration { .. } => Stage::Configure,
            BackendError::Build { stage, .. } | BackendError::Io { stage, .. } => *stage,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BackendError::Configuration { backend, error } => {
                let mut diag = Diagnostic::error(format!("{} configure failed: {}", backend, error));
                match error {
                    ConfigurationError::MissingConstraintFile => {
                        diag = diag.with_suggestion(
                            "Add exactly one file with `file-type = \"PCF\"` to the project",
                        );
                    }
                    ConfigurationError::MultipleConstraintFiles { files } => {
                        for file in files {
                            diag = diag.with_context(format!("constraint file: {}", file));
                        }
                        diag = diag.with_suggestion(format!(
                            "The {} backend accepts a single constraint file; merge or remove the others",
                            backend
                        ));
                    }
                    ConfigurationError::InvalidWorkRoot { path } => {
                        diag = diag.with_location(path).with_suggestion(
                            "Choose a different `work-root` or remove the file in the way",
                        );
                    }
                }
                diag
            }

            BackendError::Build {
                backend,
                stage,
                error,
            } => {
                let mut diag = Diagnostic::error(format!("{} {} failed: {}", backend, stage, error));
                match error {
                    BuildError::Launch { .. } => {
                        diag = diag.with_suggestion(suggestions::RUNNER_NOT_FOUND);
                    }
                    BuildError::Failed { stderr, .. } => {
                        let lines: Vec<&str> = stderr.lines().collect();
                        let start = lines.len().saturating_sub(10);
                        for line in &lines[start..] {
                            diag = diag.with_context(*line);
                        }
                        diag = diag.with_suggestion(suggestions::BUILD_FAILED);
                    }
                }
                diag
            }

            BackendError::Io {
                backend,
                stage,
                path,
                source,
            } => Diagnostic::error(format!("{} {} failed: {}", backend, stage, source))
                .with_location(path)
                .with_suggestion("Check that the work root is writable"),
        }
    }
}
