//! Command implementations

use std::path::PathBuf;

use anyhow::Result;

use edaflow::ops::{open_session, Session, SessionOptions};
use edaflow::GlobalContext;

pub mod backends;
pub mod build;
pub mod clean;
pub mod completions;
pub mod configure;

/// Flags shared by every project command.
pub struct GlobalArgs {
    pub verbose: bool,
    pub manifest_path: Option<PathBuf>,
}

impl GlobalArgs {
    /// Build the context for this invocation.
    pub fn context(&self) -> Result<GlobalContext> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_verbose(self.verbose);
        Ok(ctx)
    }

    /// Open the project session with command-specific parameters and
    /// runner arguments.
    pub fn session(
        &self,
        ctx: &GlobalContext,
        params: Vec<String>,
        runner_args: Vec<String>,
    ) -> Result<Session> {
        let opts = SessionOptions {
            manifest_path: self.manifest_path.clone(),
            params,
            runner_args,
            verbose: ctx.is_verbose(),
        };
        open_session(ctx, &opts)
    }
}
