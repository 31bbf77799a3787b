//! Loading a project into a ready-to-run backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::backend::{create_backend, Backend, BackendArgs, PipelineRunner};
use crate::core::{ParamValue, ParameterOverrides, Project};
use crate::util::config::{load_config, project_config_path};
use crate::util::fs::absolutize;
use crate::util::process::{Launcher, SystemLauncher};
use crate::util::GlobalContext;

/// Options shared by every project operation.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Explicit manifest path (default: search upward from cwd)
    pub manifest_path: Option<PathBuf>,

    /// Raw `NAME=VALUE` parameter overrides
    pub params: Vec<String>,

    /// Extra arguments for the pipeline runner
    pub runner_args: Vec<String>,

    /// Echo tool output
    pub verbose: bool,
}

/// A loaded project with its backend.
pub struct Session {
    project: Project,
    work_root: PathBuf,
    backend: Box<dyn Backend>,
    args: BackendArgs,
}

impl Session {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn args(&self) -> &BackendArgs {
        &self.args
    }
}

/// Parse `NAME=VALUE` overrides given on the command line.
pub fn parse_param_overrides(raw: &[String]) -> Result<ParameterOverrides> {
    let mut overrides = ParameterOverrides::new();
    for item in raw {
        let Some((name, value)) = item.split_once('=') else {
            bail!("invalid parameter `{}`, expected NAME=VALUE", item);
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("invalid parameter `{}`, name is empty", item);
        }
        overrides.set(name, ParamValue::parse_cli(value));
    }
    Ok(overrides)
}

/// Open a session that spawns real processes.
pub fn open_session(ctx: &GlobalContext, opts: &SessionOptions) -> Result<Session> {
    open_session_with(ctx, opts, Arc::new(SystemLauncher))
}

/// Open a session using `launcher` for the pipeline runner.
pub fn open_session_with(
    ctx: &GlobalContext,
    opts: &SessionOptions,
    launcher: Arc<dyn Launcher>,
) -> Result<Session> {
    let manifest_path = ctx.resolve_manifest(opts.manifest_path.as_deref())?;
    let project = Project::load(&manifest_path)?;
    tracing::debug!("loaded project `{}` from {}", project.name(), manifest_path.display());

    let config = load_config(&ctx.config_path(), &project_config_path(project.root()));

    let overrides = parse_param_overrides(&opts.params)?;
    let work_root = project.work_root(config.build.work_root.as_deref());
    let description = project.description(&work_root, overrides);

    let make = config.make_program();
    let program = if make.components().count() > 1 {
        absolutize(project.root(), &make)
    } else {
        make
    };
    let runner = PipelineRunner::new(program, launcher);

    let args = BackendArgs::new()
        .with_verbose(opts.verbose)
        .with_runner_args(config.runner_args())
        .with_runner_args(opts.runner_args.iter().cloned());

    let backend = create_backend(project.backend(), description, runner);

    Ok(Session {
        project,
        work_root,
        backend,
        args,
    })
}

/// Fail unless `configure` has produced the runner's input.
pub(crate) fn ensure_configured(session: &Session) -> Result<()> {
    let config_mk = session.work_root().join("config.mk");
    if !config_mk.is_file() {
        bail!(
            "`{}` is not configured: {} does not exist\n{}",
            session.project().name(),
            config_mk.display(),
            crate::util::diagnostic::suggestions::NOT_CONFIGURED
        );
    }
    Ok(())
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("project", &self.project.name())
            .field("backend", &self.backend.id())
            .field("work_root", &self.work_root)
            .finish()
    }
}
