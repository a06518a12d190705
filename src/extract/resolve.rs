use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::store::DeckStore;

/// Confirmation seam for deck names that are not in the store yet.
///
/// Keeping this behind a trait keeps the extraction engine free of terminal
/// I/O; tests script it, the CLI plugs in [`TerminalPrompt`].
pub trait DeckPrompt {
    /// Presents an unknown deck name. Returns the name to register: the
    /// proposed one, or a replacement typed by the user.
    fn confirm_or_rename(&mut self, name: &str) -> Result<String>;
}

/// Prompt on the controlling terminal. An empty line or EOF accepts the
/// proposed name, so piped runs never hang.
pub struct TerminalPrompt;

impl DeckPrompt for TerminalPrompt {
    fn confirm_or_rename(&mut self, name: &str) -> Result<String> {
        print!(
            "{} is not in the list of existing decks\npress <Enter> to add it or input an alternative name: ",
            name
        );
        io::stdout().flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read deck name from stdin")?;
        let answer = line.trim();
        if answer.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Canonical form of a deck name: trimmed, single colons doubled into the
/// `::` hierarchy separator. Runs of two or more colons pass through, which
/// makes the function idempotent. Returns None for a blank name.
pub fn canonicalize_deck_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut canonical = String::with_capacity(trimmed.len() + 2);
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ':' {
            canonical.push(c);
            continue;
        }
        let mut run = 1;
        while chars.peek() == Some(&':') {
            chars.next();
            run += 1;
        }
        if run == 1 {
            canonical.push_str("::");
        } else {
            for _ in 0..run {
                canonical.push(':');
            }
        }
    }
    Some(canonical)
}

/// Maps a raw deck name to its canonical registered form.
///
/// Known names resolve silently. An unknown name goes through the prompt
/// first; whatever comes back is canonicalized and registered (reusing the
/// existing id when the user substituted a known name). Returns None when
/// the raw name is absent or blank.
pub fn resolve_deck(
    raw: Option<&str>,
    store: &mut DeckStore,
    prompt: &mut dyn DeckPrompt,
) -> Result<Option<String>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let Some(canonical) = canonicalize_deck_name(raw) else {
        return Ok(None);
    };
    if store.contains(&canonical) {
        return Ok(Some(canonical));
    }
    let chosen = prompt.confirm_or_rename(&canonical)?;
    let name = canonicalize_deck_name(&chosen).unwrap_or(canonical);
    store.register(&name);
    Ok(Some(name))
}
