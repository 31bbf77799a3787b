//! `edaflow build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::GlobalArgs;
use edaflow::ops::{build, BuildOptions};

pub fn execute(global: &GlobalArgs, args: BuildArgs) -> Result<()> {
    let ctx = global.context()?;

    // CLI jobs go after config jobs so make sees them last
    let mut runner_args = Vec::new();
    if let Some(jobs) = args.jobs {
        runner_args.push(format!("-j{}", jobs));
    }
    runner_args.extend(args.make_args);

    let session = global.session(&ctx, args.params, runner_args)?;

    let opts = BuildOptions {
        no_configure: args.no_configure,
    };
    let outcome = build(&session, &opts)?;

    if let Some(configured) = outcome.configured {
        tracing::debug!("configured {} artifacts", configured.artifacts.len());
    }

    Ok(())
}
