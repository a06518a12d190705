//! Zettldeck - Anki flashcard extraction for Zettelkasten notes
//!
//! Zettldeck is a CLI tool and library that scans a directory of markdown
//! notes for `#anki` card blocks, polishes their content into Anki-renderable
//! form, groups the cards into named decks, and writes one `.apkg` package
//! per deck. Processed blocks are re-marked (`#anki` -> `#_anki`) in the
//! source notes so a later run does not extract them again.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `export`: Anki package writing
//! - `extract`: Extraction pipeline (pattern matching, polishing, deck resolution)
//! - `issues`: Issue type definitions and reporting
//! - `render`: Markdown to HTML rendering
//! - `scan`: Note discovery in the directory tree
//! - `store`: Persistent deck name/identifier registry

pub mod cli;
pub mod config;
pub mod export;
pub mod extract;
pub mod issues;
pub mod render;
pub mod scan;
pub mod store;
