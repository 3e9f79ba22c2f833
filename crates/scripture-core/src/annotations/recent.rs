use crate::config::RECENT_SEARCH_LIMIT;
use crate::search::Query;
use serde::{Deserialize, Serialize};

/// One remembered dictionary query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    /// Normalized query text
    pub term: String,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// Most-recent-first query history without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    items: Vec<RecentSearch>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a query now.
    pub fn record(&mut self, query: &Query) {
        let timestamp = instant::SystemTime::now()
            .duration_since(instant::SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.record_at(query, timestamp);
    }

    /// Moves (or inserts) the query to the front, then trims the history to
    /// [`RECENT_SEARCH_LIMIT`].
    pub fn record_at(&mut self, query: &Query, timestamp: u64) {
        let term = query.as_str();
        self.items.retain(|item| item.term != term);
        self.items.insert(
            0,
            RecentSearch {
                term: term.to_string(),
                timestamp,
            },
        );
        self.items.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[RecentSearch] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
