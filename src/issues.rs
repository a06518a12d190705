//! Issue types for extraction results.
//!
//! This module defines all issue types that can be raised while extracting
//! cards from a note tree. Each issue is self-contained with all information
//! needed to display it to the user.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingDeck,
    DocumentError,
    ExportError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingDeck => write!(f, "missing-deck"),
            Rule::DocumentError => write!(f, "document-error"),
            Rule::ExportError => write!(f, "export-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// Position of an issue inside a note document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl NoteLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Location plus the text of the marker line, for context display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContext {
    pub location: NoteLocation,
    pub source_line: String,
}

impl NoteContext {
    pub fn new(location: NoteLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Card block with no deck name on its marker line and no file-wide default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDeckIssue {
    pub context: NoteContext,
    /// Raw question text of the skipped block.
    pub question: String,
    /// Raw answer text of the skipped block.
    pub answer: String,
}

impl MissingDeckIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingDeck
    }
}

/// Note document that could not be read or rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl DocumentErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DocumentError
    }
}

/// Deck whose package could not be written; other decks still export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportErrorIssue {
    pub deck: String,
    /// Package path the deck was headed for.
    pub path: String,
    pub error: String,
}

impl ExportErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExportError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue raised during extraction or export.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingDeck(MissingDeckIssue),
    DocumentError(DocumentErrorIssue),
    ExportError(ExportErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingDeck(_) => MissingDeckIssue::severity(),
            Issue::DocumentError(_) => DocumentErrorIssue::severity(),
            Issue::ExportError(_) => ExportErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingDeck(_) => MissingDeckIssue::rule(),
            Issue::DocumentError(_) => DocumentErrorIssue::rule(),
            Issue::ExportError(_) => ExportErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Location inside a note (has source_line for context display).
    Note(&'a NoteContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// This trait is implemented by all issue types to provide a consistent
/// interface for the report functions. Uses `enum_dispatch` for zero-cost
/// dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (deck name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingDeckIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Note(&self.context)
    }

    fn message(&self) -> String {
        "card provides no deck name".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("name the deck with #anki=<deck> or add a file-wide '- _anki=<deck>' line")
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "skipped question {:?} and answer {:?}",
            self.question, self.answer
        ))
    }
}

impl Report for DocumentErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ExportErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.deck.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Note(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// Get line number for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Note(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    /// Get column number for sorting.
    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Note(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
