//! Search and lookup command implementations.
//!
//! Both commands open a session over the data directory, so a verse search
//! runs against the reader's current translation and a lookup lands in the
//! dictionary's search history.

use crate::config;
use crate::storage::{FileCorpusSource, FileStore};
use anyhow::{Context, Result};
use scripture_core::lexicon::{Language, Lexicon, LexiconFilter};
use scripture_core::search::{entry_results, SearchResult, VerseSearchResults};
use scripture_core::session::{DictionarySession, ReaderSession};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a verse search.
pub struct VerseSearch {
    pub translation: String,
    pub results: VerseSearchResults,
}

/// Result of a lexicon lookup, already cut to the display limit.
pub struct Lookup {
    /// Number of matching entries before the limit
    pub total: usize,
    pub results: Vec<SearchResult>,
}

/// Opens the reader session and loads its translation.
///
/// With `translation`, the reader switches to it first (and remembers it).
pub async fn open_reader(
    data_dir: &Path,
    translation: Option<&str>,
) -> Result<ReaderSession<FileStore>> {
    let store = FileStore::new(config::state_dir(data_dir));
    let source = FileCorpusSource::new(config::translations_dir(data_dir));
    let mut session = ReaderSession::open(store).context("Failed to restore reader state")?;

    match translation {
        Some(id) => session
            .switch_translation(&source, id)
            .await
            .with_context(|| format!("Failed to load translation {:?}", id))?,
        None => session.load(&source).await.with_context(|| {
            format!(
                "Failed to load translation {:?} from {}",
                session.translation(),
                source.dir().display()
            )
        })?,
    }

    info!(
        "Loaded {} ({} books)",
        session.translation(),
        session.corpus().map(|c| c.len()).unwrap_or(0)
    );
    Ok(session)
}

/// Searches verse text in the current (or given) translation.
pub async fn execute_search(
    query: &str,
    translation: Option<&str>,
    data_dir: Option<&PathBuf>,
) -> Result<VerseSearch> {
    let data_dir = config::get_data_dir(data_dir)?;
    let session = open_reader(&data_dir, translation).await?;

    info!("Searching for: \"{}\"", query);
    let results = session.search(query)?;
    info!(
        "Found {} verses, {} occurrences",
        results.len(),
        results.total_occurrences()
    );

    Ok(VerseSearch {
        translation: session.translation().to_string(),
        results,
    })
}

/// Searches the Strong's lexicon, optionally restricted to one language.
pub fn execute_lookup(
    query: &str,
    language: Option<Language>,
    limit: usize,
    data_dir: Option<&PathBuf>,
) -> Result<Lookup> {
    let data_dir = config::get_data_dir(data_dir)?;
    let (hebrew, greek) = config::load_lexicon_sources(&data_dir)?;
    let lexicon = Lexicon::from_sources(&hebrew, &greek).context("Failed to parse lexicon")?;
    info!("Loaded {} lexicon entries", lexicon.len());

    let store = FileStore::new(config::state_dir(&data_dir));
    let mut session =
        DictionarySession::open(store, lexicon).context("Failed to restore dictionary state")?;

    let filter = LexiconFilter {
        language,
        letter: None,
    };
    let matches = session.search_filtered(query, &filter);

    Ok(Lookup {
        total: matches.len(),
        results: entry_results(&matches, limit),
    })
}
