//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// edaflow - Generate and run FPGA toolchain pipelines
#[derive(Parser)]
#[command(name = "edaflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Edaflow.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the toolchain pipeline in the work root
    Configure(ConfigureArgs),

    /// Configure and run the toolchain pipeline
    Build(BuildArgs),

    /// Remove pipeline outputs
    Clean(CleanArgs),

    /// List backends and the tools they need
    Backends,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Override a top-level parameter (NAME=VALUE)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Print the generated artifacts as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Override a top-level parameter (NAME=VALUE)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Run the existing pipeline without regenerating it
    #[arg(long)]
    pub no_configure: bool,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Extra arguments passed to make
    #[arg(last = true)]
    pub make_args: Vec<String>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Delete every generated file directly instead of running `make clean`
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
