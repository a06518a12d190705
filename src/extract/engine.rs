use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tempfile::NamedTempFile;

use super::pattern::{self, MatchedBlock};
use super::polish::polish;
use super::resolve::{DeckPrompt, resolve_deck};
use crate::issues::{DocumentErrorIssue, Issue, MissingDeckIssue, NoteContext, NoteLocation};
use crate::render::to_html;
use crate::store::DeckStore;

/// One extracted flashcard, fields already rendered to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub question: String,
    pub answer: String,
    /// Media paths referenced by either field, question first.
    pub media: Vec<String>,
}

/// Knobs for one extraction pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Print every card as it is extracted.
    pub verbose: bool,
    /// Also print polished segments, and leave the documents untouched.
    pub debug: bool,
}

/// Everything one pass over the document list produced.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    /// Extracted cards keyed by canonical deck name.
    pub decks: BTreeMap<String, Vec<Card>>,
    pub issues: Vec<Issue>,
    pub documents_rewritten: usize,
}

/// Runs the extraction pipeline over `documents` in order.
///
/// A document that cannot be read or rewritten is reported as an issue and
/// the pass moves on; it never aborts the whole run.
pub fn extract_from_documents(
    documents: &[PathBuf],
    store: &mut DeckStore,
    prompt: &mut dyn DeckPrompt,
    options: ExtractOptions,
) -> Result<ExtractOutcome> {
    let mut outcome = ExtractOutcome::default();
    for path in documents {
        if let Err(err) = extract_from_document(path, store, prompt, options, &mut outcome) {
            outcome.issues.push(Issue::DocumentError(DocumentErrorIssue {
                file_path: path.display().to_string(),
                error: format!("{:#}", err),
            }));
        }
    }
    Ok(outcome)
}

fn extract_from_document(
    path: &Path,
    store: &mut DeckStore,
    prompt: &mut dyn DeckPrompt,
    options: ExtractOptions,
    outcome: &mut ExtractOutcome,
) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;

    // The file-wide default is resolved up front, before any block needs it.
    let default_deck = resolve_deck(pattern::file_default_deck(&text), store, prompt)?;

    let mut processed = Vec::new();
    for block in pattern::match_blocks(&text) {
        let deck = match resolve_deck(block.deck.as_deref(), store, prompt)? {
            Some(name) => name,
            None => match &default_deck {
                Some(name) => name.clone(),
                None => {
                    processed.push(false);
                    outcome
                        .issues
                        .push(missing_deck_issue(path, &text, &block));
                    continue;
                }
            },
        };
        processed.push(true);

        if options.verbose || options.debug {
            println!(
                "{} card from {} ({})",
                "Adding".cyan().bold(),
                path.display(),
                deck
            );
            println!("{}", block.question);
            println!();
            println!("{}", block.answer);
        }

        let question = polish(&block.question);
        let answer = polish(&block.answer);

        if options.debug {
            println!("{}", "--------------------".dimmed());
            println!("{}", question.text);
            println!();
            println!("{}", answer.text);
        }

        let mut media = question.media;
        media.extend(answer.media);

        outcome.decks.entry(deck).or_default().push(Card {
            question: to_html(&question.text),
            answer: to_html(&answer.text),
            media,
        });
    }

    if processed.contains(&true) && !options.debug {
        let rewritten = pattern::mark_processed(&text, &processed)?;
        write_document(path, &rewritten)?;
        outcome.documents_rewritten += 1;
    }

    Ok(())
}

fn missing_deck_issue(path: &Path, text: &str, block: &MatchedBlock) -> Issue {
    let start = block.span.start;
    let line = text[..start].matches('\n').count() + 1;
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let col = text[line_start..start].chars().count() + 1;
    let source_line = text[line_start..].lines().next().unwrap_or("");
    Issue::MissingDeck(MissingDeckIssue {
        context: NoteContext::new(
            NoteLocation::new(path.display().to_string(), line, col),
            source_line,
        ),
        question: block.question.clone(),
        answer: block.answer.clone(),
    })
}

/// Replaces the document through a temp file in the same directory, so a
/// failed write never leaves the note half-rewritten.
fn write_document(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file next to: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write rewritten document: {}", path.display()))?;
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace document: {}", path.display()))?;
    Ok(())
}
