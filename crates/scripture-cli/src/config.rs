//! Configuration and path resolution for the CLI.
//!
//! Everything lives under one data directory:
//!
//! ```text
//! <data-dir>/
//!   translations/<id>.json       translation documents (either JSON shape)
//!   lexicon/strong_hebrew.xml    Strong's Hebrew dictionary
//!   lexicon/strong_greek.xml     Strong's Greek dictionary
//!   state/<key>.json             persisted session state
//! ```

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable for a custom data directory
const DATA_DIR_ENV: &str = "SCRIPTURE_DATA_DIR";

const TRANSLATIONS_DIR: &str = "translations";
const LEXICON_DIR: &str = "lexicon";
const STATE_DIR: &str = "state";

const HEBREW_FILENAME: &str = "strong_hebrew.xml";
const GREEK_FILENAME: &str = "strong_greek.xml";

/// Returns the data directory.
///
/// Search order:
/// 1. `--data-dir` argument
/// 2. `$SCRIPTURE_DATA_DIR` environment variable
/// 3. Platform data directory:
///    - macOS: `~/Library/Application Support/org.scripture.Scripture/`
///    - Linux: `~/.local/share/scripture/`
///    - Windows: `%APPDATA%\scripture\Scripture\data\`
pub fn get_data_dir(custom_dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = custom_dir {
        return Ok(dir.clone());
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("org", "scripture", "Scripture")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Directory holding `<id>.json` translation documents.
pub fn translations_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(TRANSLATIONS_DIR)
}

/// Directory holding persisted session state.
pub fn state_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_DIR)
}

/// Reads both lexicon documents as `(hebrew, greek)`.
pub fn load_lexicon_sources(data_dir: &Path) -> Result<(String, String)> {
    let dir = data_dir.join(LEXICON_DIR);
    let read = |name: &str| {
        let path = dir.join(name);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read lexicon file: {}", path.display()))
    };
    Ok((read(HEBREW_FILENAME)?, read(GREEK_FILENAME)?))
}
