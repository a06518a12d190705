use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::Rng;
use serde_json::{Map, Value, json};

/// Default file name of the deck registry, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "decks.json";

/// Deck identifiers are drawn from [2^30, 2^31), the range Anki treats as a
/// randomly generated id.
pub const DECK_ID_MIN: i64 = 1 << 30;
pub const DECK_ID_MAX: i64 = 1 << 31;

/// Persistent registry mapping deck names to their stable Anki identifiers.
///
/// The registry lives in a JSON file with a `decks` array of
/// `{"name": ..., "id": ...}` entries. Unknown top-level keys in the file are
/// preserved across a save, in their original order.
#[derive(Debug)]
pub struct DeckStore {
    file_path: PathBuf,
    root: Map<String, Value>,
    decks: BTreeMap<String, i64>,
    added: Vec<String>,
}

impl DeckStore {
    /// Loads the registry from `path`. A missing or malformed file is an
    /// error; the caller is expected to create the file first (`init` writes
    /// an empty one).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck store: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deck store: {}", path.display()))?;
        let Value::Object(root) = value else {
            bail!("Deck store root must be a JSON object: {}", path.display());
        };

        let entries = root
            .get("decks")
            .and_then(Value::as_array)
            .with_context(|| {
                format!("Deck store is missing a 'decks' array: {}", path.display())
            })?;

        let mut decks = BTreeMap::new();
        for entry in entries {
            let name = entry.get("name").and_then(Value::as_str).with_context(|| {
                format!("Deck entry is missing a 'name' string: {}", path.display())
            })?;
            let id = entry.get("id").and_then(Value::as_i64).with_context(|| {
                format!("Deck entry is missing an 'id' number: {}", path.display())
            })?;
            decks.insert(name.to_string(), id);
        }

        Ok(Self {
            file_path: path.to_path_buf(),
            root,
            decks,
            added: Vec::new(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decks.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<i64> {
        self.decks.get(name).copied()
    }

    /// Returns the id registered for `name`, allocating a fresh random id if
    /// the name is new. New names mark the store as changed.
    pub fn register(&mut self, name: &str) -> i64 {
        if let Some(id) = self.decks.get(name) {
            return *id;
        }
        let id = rand::thread_rng().gen_range(DECK_ID_MIN..DECK_ID_MAX);
        self.decks.insert(name.to_string(), id);
        self.added.push(name.to_string());
        id
    }

    /// Number of names registered since the store was loaded.
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Writes the registry back to its file, sorted by deck name. Does
    /// nothing when the set of names is unchanged. Returns whether a write
    /// happened.
    pub fn save(&self) -> Result<bool> {
        if self.added.is_empty() {
            return Ok(false);
        }
        let entries: Vec<Value> = self
            .decks
            .iter()
            .map(|(name, id)| json!({ "name": name, "id": id }))
            .collect();
        let mut root = self.root.clone();
        root.insert("decks".to_string(), Value::Array(entries));
        let content = serde_json::to_string_pretty(&Value::Object(root))
            .context("Failed to serialize deck store")?;
        fs::write(&self.file_path, format!("{}\n", content))
            .with_context(|| format!("Failed to write deck store: {}", self.file_path.display()))?;
        Ok(true)
    }
}

/// Content of a freshly initialized, empty deck store file.
pub fn default_store_json() -> Result<String> {
    let content = serde_json::to_string_pretty(&json!({ "decks": [] }))
        .context("Failed to serialize default deck store")?;
    Ok(format!("{}\n", content))
}
