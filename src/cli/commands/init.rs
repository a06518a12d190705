use std::{fs, path::Path};

use anyhow::{Context, Ok, Result, bail};

use super::helper::finish;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};
use crate::store::{DEFAULT_STORE_FILE, default_store_json};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    let store_path = Path::new(DEFAULT_STORE_FILE);
    if store_path.exists() {
        bail!("{} already exists", DEFAULT_STORE_FILE);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    fs::write(store_path, default_store_json()?)
        .with_context(|| format!("Failed to write {}", DEFAULT_STORE_FILE))?;

    Ok(finish(
        CommandSummary::Init(InitSummary {
            created: vec![CONFIG_FILE_NAME.to_owned(), DEFAULT_STORE_FILE.to_owned()],
        }),
        Vec::new(),
        0,
        true,
    ))
}
