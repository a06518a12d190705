use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use genanki_rs::{Deck, Field, Model, Note, Package, Template};

use crate::extract::Card;
use crate::issues::{ExportErrorIssue, Issue};
use crate::store::DeckStore;

/// Shared note model for every exported card. The id is fixed so packages
/// from different runs merge into the same model on import.
const MODEL_ID: i64 = 1440894177;

fn basic_model() -> Model {
    Model::new(
        MODEL_ID,
        "Basic",
        vec![Field::new("front"), Field::new("back")],
        vec![
            Template::new("Card 1")
                .qfmt("{{front}}")
                .afmt("{{FrontSide}}<hr id=\"answer\">{{back}}"),
        ],
    )
}

/// Package file name for a deck: hierarchy separators are not filesystem
/// material, so they are flattened to underscores.
pub fn package_file_name(deck: &str) -> String {
    format!("{}.apkg", deck.replace("::", "_"))
}

/// Writes one `.apkg` per deck into `output_root`, creating the directory
/// first. A deck that fails to export becomes an issue; the remaining decks
/// still get written.
pub fn export_decks(
    decks: &BTreeMap<String, Vec<Card>>,
    store: &DeckStore,
    output_root: &Path,
) -> Result<(usize, Vec<Issue>)> {
    fs::create_dir_all(output_root).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_root.display()
        )
    })?;

    let mut issues = Vec::new();
    let mut written = 0;
    for (name, cards) in decks {
        match export_deck(name, cards, store, output_root) {
            Ok(()) => written += 1,
            Err(err) => issues.push(Issue::ExportError(ExportErrorIssue {
                deck: name.clone(),
                path: output_root.join(package_file_name(name)).display().to_string(),
                error: format!("{:#}", err),
            })),
        }
    }
    Ok((written, issues))
}

fn export_deck(
    name: &str,
    cards: &[Card],
    store: &DeckStore,
    output_root: &Path,
) -> Result<()> {
    let id = store
        .id_of(name)
        .with_context(|| format!("Deck is not registered: {}", name))?;

    let model = basic_model();
    let mut deck = Deck::new(id, name, "");
    let mut media: Vec<&str> = Vec::new();
    for card in cards {
        let note = Note::new(model.clone(), vec![&card.question, &card.answer])
            .map_err(|err| anyhow!("Failed to build note: {}", err))?;
        deck.add_note(note);
        media.extend(card.media.iter().map(String::as_str));
    }

    let path = output_root.join(package_file_name(name));
    let path_str = path.to_string_lossy();
    let mut package = Package::new(vec![deck], media)
        .map_err(|err| anyhow!("Failed to assemble package: {}", err))?;
    package
        .write_to_file(&path_str)
        .map_err(|err| anyhow!("Failed to write package {}: {}", path.display(), err))?;
    Ok(())
}
