//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow zettldeck to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{BuildSummary, CommandResult, CommandSummary, InitSummary};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// This is the main entry point for reporting. Issues are sorted and
/// displayed with severity, location, source context, and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a warning about paths the note scanner could not access.
pub fn print_skip_warning(count: usize, verbose: bool) {
    print_skip_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a skip warning to a custom writer.
pub fn print_skip_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Note(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| {
            let loc = i.location();
            match loc {
                ReportLocation::Note(ctx) => Some(ctx.line()),
                ReportLocation::File { .. } => None,
            }
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col, _) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col, _) = extract_location_info(&b_loc);

    a_path
        .cmp(b_path)
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
}

pub fn print(result: &CommandResult, verbose: bool) {
    report(&result.issues);

    match &result.summary {
        CommandSummary::Build(summary) => {
            print_build(summary, result.issues.is_empty());
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }

    print_skip_warning(result.skipped_count, verbose);
}

fn print_build(summary: &BuildSummary, clean: bool) {
    if summary.card_count == 0 {
        println!("didn't find any new cards (with a {} tag)", "#anki".cyan());
        return;
    }

    for (deck, count) in &summary.deck_counts {
        if summary.is_debug {
            println!(
                "{} {} card(s) to {}",
                "Would add".yellow().bold(),
                count,
                deck
            );
        } else {
            println!("{} {} card(s) to {}", "Added".green().bold(), count, deck);
        }
    }

    if summary.is_debug {
        if summary.new_deck_count > 0 {
            println!(
                "{} {} new deck(s) in {}",
                "Would register".yellow().bold(),
                summary.new_deck_count,
                summary.store_file.display()
            );
        }
        println!(
            "Run without {} to write packages and mark the notes.",
            "--debug".cyan()
        );
        return;
    }

    if summary.documents_rewritten > 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Marked {} document(s) as processed",
                summary.documents_rewritten
            )
            .green()
        );
    }

    if summary.store_saved {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Added {} new deck(s) to {}",
                summary.new_deck_count,
                summary.store_file.display()
            )
            .green()
        );
    }

    if clean {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} document(s), wrote {} package(s) to {}",
                summary.documents_scanned,
                summary.packages_written,
                summary.output_root.display()
            )
            .green()
        );
    }
}

fn print_init(summary: &InitSummary) {
    for file in &summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", file).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
