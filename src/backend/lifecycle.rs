//! Lifecycle glue shared by every backend.
//!
//! Backends call these helpers from their `configure`/`build`/`clean`
//! implementations instead of inheriting behavior.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::error::{BackendError, BuildError, ConfigurationError, Stage};
use crate::backend::registry::BackendId;
use crate::backend::trait_def::{BackendArgs, GeneratedArtifact};
use crate::core::BuildIdentity;
use crate::util::hash::sha256_str;
use crate::util::process::{Launcher, ProcessBuilder, ProcessOutput, SystemLauncher};

/// The program that runs a generated pipeline and the launcher used to
/// spawn it.
#[derive(Clone)]
pub struct PipelineRunner {
    program: PathBuf,
    launcher: Arc<dyn Launcher>,
}

impl PipelineRunner {
    /// Runner using `program` through `launcher`.
    pub fn new(program: impl Into<PathBuf>, launcher: Arc<dyn Launcher>) -> Self {
        PipelineRunner {
            program: program.into(),
            launcher,
        }
    }

    /// `make` from PATH, spawned as a real process.
    pub fn system() -> Self {
        Self::new("make", Arc::new(SystemLauncher))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command for running `targets` of the pipeline in `work_root`.
    pub fn command(&self, work_root: &Path, args: &BackendArgs, targets: &[&str]) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .args(&args.runner_args)
            .args(targets)
            .cwd(work_root)
    }

    /// Launch a command and wait for it to exit.
    pub fn launch(&self, cmd: &ProcessBuilder) -> anyhow::Result<ProcessOutput> {
        self.launcher.launch(cmd)
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

/// Make sure the work root exists and is a directory.
pub fn prepare_work_root(backend: BackendId, identity: &BuildIdentity) -> Result<(), BackendError> {
    let work_root = identity.work_root();
    if work_root.exists() && !work_root.is_dir() {
        return Err(BackendError::Configuration {
            backend,
            error: ConfigurationError::InvalidWorkRoot {
                path: work_root.to_path_buf(),
            },
        });
    }

    std::fs::create_dir_all(work_root).map_err(|source| BackendError::Io {
        backend,
        stage: Stage::Configure,
        path: work_root.to_path_buf(),
        source,
    })?;

    tracing::info!("Configuring `{}` in {}", identity.name(), work_root.display());
    Ok(())
}

/// Write one artifact into the work root.
pub fn write_artifact(
    backend: BackendId,
    identity: &BuildIdentity,
    file_name: &str,
    contents: &str,
) -> Result<GeneratedArtifact, BackendError> {
    let path = identity.work_root().join(file_name);
    std::fs::write(&path, contents).map_err(|source| BackendError::Io {
        backend,
        stage: Stage::Configure,
        path: path.clone(),
        source,
    })?;

    tracing::debug!("wrote {}", path.display());
    Ok(GeneratedArtifact {
        path,
        sha256: sha256_str(contents),
    })
}

/// Delete the generated files that exist, returning the removed paths.
pub fn remove_generated(backend: BackendId, files: &[PathBuf]) -> Result<Vec<PathBuf>, BackendError> {
    let mut removed = Vec::new();
    for path in files.iter().filter(|p| p.is_file()) {
        std::fs::remove_file(path).map_err(|source| BackendError::Io {
            backend,
            stage: Stage::Clean,
            path: path.clone(),
            source,
        })?;
        tracing::debug!("removed {}", path.display());
        removed.push(path.clone());
    }
    Ok(removed)
}

/// Run a pipeline command, turning launch failures and non-zero exits into
/// a [`BuildError`] for `stage`.
pub fn run_pipeline(
    backend: BackendId,
    stage: Stage,
    runner: &PipelineRunner,
    cmd: &ProcessBuilder,
    args: &BackendArgs,
) -> Result<ProcessOutput, BackendError> {
    let command = cmd.display_command();
    tracing::debug!("{} {}: running `{}`", backend, stage, command);

    let output = runner.launch(cmd).map_err(|e| BackendError::Build {
        backend,
        stage,
        error: BuildError::Launch {
            command: command.clone(),
            reason: format!("{:#}", e),
        },
    })?;

    if args.verbose {
        for line in output.stdout.lines().chain(output.stderr.lines()) {
            tracing::info!("{}", line);
        }
    }

    if !output.success() {
        return Err(BackendError::Build {
            backend,
            stage,
            error: BuildError::Failed {
                command,
                code: output.code,
                stderr: output.stderr,
            },
        });
    }

    Ok(output)
}

/// Log the start of a build.
pub fn begin_build(backend: BackendId, identity: &BuildIdentity) {
    tracing::info!("Building `{}` with {}", identity.name(), backend);
}

/// Log where the final artifact went.
pub fn report_done(identity: &BuildIdentity, output: &Path) {
    tracing::info!("Finished `{}` -> {}", identity.name(), output.display());
}
