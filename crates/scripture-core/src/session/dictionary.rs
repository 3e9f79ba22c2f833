use super::restore;
use crate::annotations::{AnnotationSet, RecentSearches};
use crate::config::keys;
use crate::error::SessionError;
use crate::lexicon::{Lexicon, LexiconEntry, LexiconFilter};
use crate::search::{search_lexicon, EntryMatch, Query};
use crate::storage::{save_json, KeyValueStore};
use tracing::{debug, warn};

/// State of one dictionary: the lexicon, favourite entries and query
/// history.
#[derive(Debug)]
pub struct DictionarySession<S: KeyValueStore> {
    store: S,
    lexicon: Lexicon,
    favorites: AnnotationSet<String>,
    recent: RecentSearches,
}

impl<S: KeyValueStore> DictionarySession<S> {
    /// Restores favourites and history from `store`.
    pub fn open(store: S, lexicon: Lexicon) -> Result<Self, SessionError> {
        Ok(Self {
            favorites: restore(&store, keys::FAVORITES)?,
            recent: restore(&store, keys::RECENT_SEARCHES)?,
            lexicon,
            store,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn favorites(&self) -> &AnnotationSet<String> {
        &self.favorites
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Ranked search over the whole lexicon.
    ///
    /// A non-blank query is recorded in the history.
    pub fn search(&mut self, query: &str) -> Vec<EntryMatch<'_>> {
        self.search_filtered(query, &LexiconFilter::default())
    }

    /// Ranked search over the entries passing `filter`.
    ///
    /// The history is only updated once it has been written. A failed write
    /// is logged and the matches are still returned.
    pub fn search_filtered(
        &mut self,
        query: &str,
        filter: &LexiconFilter,
    ) -> Vec<EntryMatch<'_>> {
        let entries = self
            .lexicon
            .entries()
            .iter()
            .filter(|entry| filter.matches(entry));
        let matches = search_lexicon(entries, query);

        if let Some(parsed) = Query::parse(query) {
            let mut recent = self.recent.clone();
            recent.record(&parsed);
            match save_json(&self.store, keys::RECENT_SEARCHES, &recent) {
                Ok(()) => self.recent = recent,
                Err(e) => warn!("Failed to save search history: {}", e),
            }
        }
        matches
    }

    /// Toggles an entry in favourites; returns `true` if now a favourite.
    ///
    /// Ids are stored as the lexicon spells them, so `h430` and `H430` are
    /// the same favourite. Unknown ids are still toggled.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, SessionError> {
        let id = self
            .lexicon
            .get(id)
            .map(|entry| entry.id.clone())
            .unwrap_or_else(|| id.to_string());
        let now = self.favorites.toggle(id);
        save_json(&self.store, keys::FAVORITES, &self.favorites)?;
        Ok(now)
    }

    /// Favourite entries present in the lexicon, in lexicon order.
    pub fn favorite_entries(&self) -> Vec<&LexiconEntry> {
        self.lexicon
            .entries()
            .iter()
            .filter(|entry| self.favorites.has(&entry.id))
            .collect()
    }

    pub fn clear_history(&mut self) -> Result<(), SessionError> {
        self.recent.clear();
        save_json(&self.store, keys::RECENT_SEARCHES, &self.recent)?;
        debug!("Cleared search history");
        Ok(())
    }
}
