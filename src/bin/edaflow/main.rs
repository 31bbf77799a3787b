//! edaflow CLI - FPGA toolchain orchestration

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use edaflow::core::ManifestError;
use edaflow::util::diagnostic::suggestions;
use edaflow::BackendError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    // Escapes only go to a terminal
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        eprintln!("error: {:#}", e);
        // Backend failures carry extra context and suggestions
        if let Some(backend_err) = e.downcast_ref::<BackendError>() {
            for line in backend_err.to_diagnostic().format(color).lines().skip(1) {
                eprintln!("{}", line);
            }
        } else if let Some(ManifestError::NotFound { .. }) = e.downcast_ref::<ManifestError>() {
            eprintln!("{}", suggestions::NO_MANIFEST);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("edaflow=debug")
    } else {
        EnvFilter::new("edaflow=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    let global = commands::GlobalArgs {
        verbose: cli.verbose,
        manifest_path: cli.manifest_path,
    };

    // Execute command
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(&global, args),
        Commands::Build(args) => commands::build::execute(&global, args),
        Commands::Clean(args) => commands::clean::execute(&global, args),
        Commands::Backends => commands::backends::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
