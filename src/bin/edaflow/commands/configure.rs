//! `edaflow configure` command

use anyhow::{Context, Result};

use crate::cli::ConfigureArgs;
use crate::commands::GlobalArgs;
use edaflow::ops::configure;

pub fn execute(global: &GlobalArgs, args: ConfigureArgs) -> Result<()> {
    let ctx = global.context()?;
    let session = global.session(&ctx, args.params, Vec::new())?;

    let result = configure(&session)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("failed to serialize configure result")?;
        println!("{}", json);
    } else {
        for artifact in &result.artifacts {
            eprintln!("       Wrote {}", artifact.path.display());
        }
    }

    Ok(())
}
