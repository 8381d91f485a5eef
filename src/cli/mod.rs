//! Command line interface for github-binary-upload.
//!
//! Parses arguments, loads credentials, runs the publish and reports the
//! result with colored output.

mod args;
mod commands;
mod output;

pub use args::{Args, PublishRequest};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
