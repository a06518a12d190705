use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, cards extracted or nothing to do
/// - `Failure` (1): Command completed but some documents or decks failed
/// - `Error` (2): Command failed due to internal error (config error, missing store, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, cards extracted or nothing to do.
    Success,
    /// Command completed but some documents or decks failed.
    Failure,
    /// Command failed due to internal error (config error, missing store, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
