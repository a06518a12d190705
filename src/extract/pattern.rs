use std::ops::Range;
use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::{Captures, Regex};

/// Marker tag of a pending card block.
pub const CARD_TAG: &str = "#anki";

/// Spelling the marker is flipped to once the card has been extracted.
/// It no longer matches the card pattern, so a re-run skips the block.
pub const DONE_TAG: &str = "#_anki";

/// A card block is a `#anki` marker line, a question terminated by a blank
/// line, and an answer terminated by a blank line or the end of the document.
/// The terminating blank line is consumed by the match; since every block
/// starts at a marker tag, a consumed terminator can never hide the start of
/// the next block. Overlapping or nested blocks are not a thing: matching is
/// first-match-wins, left to right.
static CARD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#anki=?(.*) *\n([\s\S]+?)\n *\n([\s\S]+?)(?:\n *\n|\z)").unwrap()
});

/// File-wide default deck declaration. Only the first one counts.
static DEFAULT_DECK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- _anki=(.*)").unwrap());

/// One card block located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedBlock {
    /// Raw deck name from the marker line; None when the marker carries none.
    pub deck: Option<String>,
    pub question: String,
    pub answer: String,
    /// Byte range of the full match within the document.
    pub span: Range<usize>,
}

/// Locates every card block in `text`, in document order.
pub fn match_blocks(text: &str) -> Vec<MatchedBlock> {
    let mut blocks = Vec::new();
    for caps in CARD_REGEX.captures_iter(text) {
        let (Some(full), Some(question), Some(answer)) =
            (caps.get(0), caps.get(2), caps.get(3))
        else {
            continue;
        };
        let deck_raw = caps.get(1).map_or("", |m| m.as_str());
        let deck = if deck_raw.is_empty() {
            None
        } else {
            Some(deck_raw.to_string())
        };
        blocks.push(MatchedBlock {
            deck,
            question: question.as_str().to_string(),
            answer: answer.as_str().to_string(),
            span: full.range(),
        });
    }
    blocks
}

/// Raw name from the first file-wide `- _anki=` declaration, if any.
pub fn file_default_deck(text: &str) -> Option<&str> {
    DEFAULT_DECK_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrites `text`, flipping the leading pending tag of each block whose
/// `processed` flag is set. Flags must line up one-to-one with the card
/// matches in document order; a mismatch aborts the rewrite so the document
/// is left untouched.
pub fn mark_processed(text: &str, processed: &[bool]) -> Result<String> {
    let mut flags = processed.iter();
    let mut surplus_match = false;
    let rewritten = CARD_REGEX.replace_all(text, |caps: &Captures<'_>| {
        let block = caps.get(0).map_or("", |m| m.as_str());
        match flags.next() {
            Some(true) => block.replacen(CARD_TAG, DONE_TAG, 1),
            Some(false) => block.to_string(),
            None => {
                surplus_match = true;
                block.to_string()
            }
        }
    });
    if surplus_match || flags.next().is_some() {
        bail!("Processed flags do not line up with card blocks");
    }
    Ok(rewritten.into_owned())
}
