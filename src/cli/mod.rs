mod args;
mod build;

pub use args::{Args, BuildArgs, Command};
pub use build::run_build;
