//! `edaflow clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use crate::commands::GlobalArgs;
use edaflow::ops::{clean, CleanOptions, CleanOutcome};

pub fn execute(global: &GlobalArgs, args: CleanArgs) -> Result<()> {
    let ctx = global.context()?;
    let session = global.session(&ctx, Vec::new(), Vec::new())?;

    let opts = CleanOptions { all: args.all };
    match clean(&session, &opts)? {
        CleanOutcome::NothingToClean => {}
        CleanOutcome::CleanRule => {
            eprintln!("     Cleaned {}", session.work_root().display());
        }
        CleanOutcome::Removed(files) => {
            for file in &files {
                eprintln!("     Removed {}", file.display());
            }
        }
    }

    Ok(())
}
