use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct BuildSummary {
    /// Card count per deck, in deck order.
    pub deck_counts: Vec<(String, usize)>,
    pub card_count: usize,
    pub documents_scanned: usize,
    pub documents_rewritten: usize,
    pub packages_written: usize,
    pub new_deck_count: usize,
    pub store_saved: bool,
    pub store_file: PathBuf,
    pub output_root: PathBuf,
    pub is_debug: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: Vec<String>,
}

/// Result of running zettldeck commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for commands that only report work to do).
    pub exit_on_errors: bool,
    /// All issues found during the run, sorted by location.
    /// Empty for commands that cannot produce issues.
    pub issues: Vec<Issue>,
    /// Number of paths the note scanner could not access.
    pub skipped_count: usize,
}
