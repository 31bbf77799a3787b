//! Implementation of `edaflow build`.

use anyhow::{Context, Result};

use crate::backend::{BuildResult, ConfigureResult};
use crate::ops::edaflow_configure::configure;
use crate::ops::session::{ensure_configured, Session};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Run the existing pipeline without regenerating it
    pub no_configure: bool,
}

/// Outcome of a build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Artifacts written by the configure step, if it ran
    pub configured: Option<ConfigureResult>,

    /// Result of running the pipeline
    pub result: BuildResult,
}

/// Configure (unless disabled), build, then notify the backend.
pub fn build(session: &Session, opts: &BuildOptions) -> Result<BuildOutcome> {
    let configured = if opts.no_configure {
        ensure_configured(session)?;
        None
    } else {
        Some(configure(session)?)
    };

    let backend = session.backend();
    let result = backend
        .build(session.args())
        .with_context(|| format!("failed to build `{}`", session.project().name()))?;
    backend.done(session.args());

    Ok(BuildOutcome { configured, result })
}
