//! `edaflow backends` command
//!
//! List backends and whether their tools are installed.

use anyhow::Result;

use edaflow::backend::get_backend_summaries;

pub fn execute() -> Result<()> {
    println!("Backends:");
    println!();

    for summary in get_backend_summaries() {
        let status = if summary.is_available() {
            "available"
        } else {
            "missing tools"
        };
        println!("  {} - {}", summary.id, status);

        for (tool, path) in &summary.tools {
            match path {
                Some(path) => println!("    {:<12} {}", tool, path.display()),
                None => println!("    {:<12} not found", tool),
            }
        }
        println!();
    }

    Ok(())
}
