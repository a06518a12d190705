use std::path::{Path, PathBuf};

use anyhow::{Ok, Result, bail};

use super::super::args::BuildCommand;
use super::helper::finish;
use super::{BuildSummary, CommandResult, CommandSummary};
use crate::{
    config::load_config,
    export::export_decks,
    extract::{ExtractOptions, extract_from_documents, resolve::TerminalPrompt},
    scan::scan_notes,
    store::DeckStore,
};

pub fn build(cmd: BuildCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let verbose = args.common.verbose || args.debug;

    let mut config = load_config(Path::new("."))?.config;

    if let Some(notes) = &args.common.notes {
        config.notes_root = notes.display().to_string();
    }
    if let Some(out) = &args.common.out {
        config.output_root = out.display().to_string();
    }
    if let Some(store) = &args.common.store {
        config.store_file = store.display().to_string();
    }

    let notes_root = PathBuf::from(&config.notes_root);
    if !notes_root.is_dir() {
        bail!("Notes path {} is not a directory", notes_root.display());
    }

    let store_file = PathBuf::from(&config.store_file);
    let mut store = DeckStore::load(&store_file)?;

    let scan = scan_notes(&notes_root, &config.ignores, verbose);
    let documents_scanned = scan.files.len();

    let mut prompt = TerminalPrompt;
    let options = ExtractOptions {
        verbose: args.common.verbose,
        debug: args.debug,
    };
    let outcome = extract_from_documents(&scan.files, &mut store, &mut prompt, options)?;

    let output_root = PathBuf::from(&config.output_root);
    let (packages_written, export_issues) = if !args.debug && !outcome.decks.is_empty() {
        export_decks(&outcome.decks, &store, &output_root)?
    } else {
        (0, Vec::new())
    };

    let new_deck_count = store.added_count();
    let store_saved = if args.debug { false } else { store.save()? };

    let deck_counts: Vec<(String, usize)> = outcome
        .decks
        .iter()
        .map(|(name, cards)| (name.clone(), cards.len()))
        .collect();
    let card_count = deck_counts.iter().map(|(_, count)| *count).sum();

    let mut issues = outcome.issues;
    issues.extend(export_issues);

    Ok(finish(
        CommandSummary::Build(BuildSummary {
            deck_counts,
            card_count,
            documents_scanned,
            documents_rewritten: outcome.documents_rewritten,
            packages_written,
            new_deck_count,
            store_saved,
            store_file,
            output_root,
            is_debug: args.debug,
        }),
        issues,
        scan.skipped_count,
        true,
    ))
}
