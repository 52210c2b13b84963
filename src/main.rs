use anyhow::Result;
use clap::Parser;

use tinypack::cli::{run_build, Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Build(build_args) => run_build(build_args).await,
    }
}
