use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{build::build, init::init},
};

/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// Returns `Ok(CommandResult)` with issue counts and exit behavior, or `Err`
/// if the command fails outright (e.g. config error, missing deck store).
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
