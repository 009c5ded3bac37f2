//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads from the registry in [`Context`]
//! 2. Formats and prints the result
//!
//! Handlers never mutate the registry after the manifest is applied.

mod categories;
mod completion;
mod has;
mod list;
mod resolve;

// Re-export command functions for testing and direct invocation
pub use categories::categories;
pub use completion::completion;
pub use has::has;
pub use list::list;
pub use resolve::resolve;

use std::process::ExitCode;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Resolve { path } => resolve(ctx, &path)?,
        Command::Has { path } => {
            if !has(ctx, &path) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List { prefix } => list(ctx, prefix.as_deref())?,
        Command::Categories => categories(ctx),
        Command::Completion { shell } => completion(shell)?,
    }
    Ok(ExitCode::SUCCESS)
}
