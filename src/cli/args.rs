use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tinypack",
    version,
    about = "Bundle a module graph into a single concatenated file"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Index a source tree and bundle everything reachable from an entry point
    Build(BuildArgs),
}

#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Root directory to index
    pub root: PathBuf,

    /// Entry-point file, resolved against the current working directory
    #[arg(long)]
    pub entry_point: PathBuf,

    /// Comma-separated list of file extensions to index (default: js)
    #[arg(long)]
    pub extensions: Option<String>,

    /// Indexing worker pool size (default: number of logical CPUs)
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// TOML config file; CLI flags take precedence over its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the on-disk specifier cache (speeds up repeat runs)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Write the bundle to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit a machine-readable JSON report instead of styled output
    #[arg(long)]
    pub json: bool,

    /// Suppress diagnostics; print only the bundle
    #[arg(short, long)]
    pub quiet: bool,
}
