use crate::address::VerseAddress;
use crate::lexicon::LexiconEntry;
use crate::text::fold_case;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized search query.
///
/// Construction trims surrounding whitespace and case-folds the text. A
/// query that is empty after trimming cannot be constructed, which is how
/// every search short-circuits on blank input without touching the corpus.
///
/// # Examples
///
/// ```
/// use scripture_core::search::Query;
///
/// let query = Query::parse("  Beginning ").unwrap();
/// assert_eq!(query.as_str(), "beginning");
/// assert!(Query::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// Trimmed text as typed
    raw: String,
    /// Trimmed, case-folded text used for matching
    folded: String,
}

impl Query {
    /// Normalizes `input`; `None` if nothing but whitespace remains.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: fold_case(raw),
        })
    }

    /// The case-folded form used for comparisons.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// The trimmed query as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A verse containing the query at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMatch {
    /// Verse-level address (1-based verse)
    pub address: VerseAddress,
    pub book_name: String,
    /// Full verse text
    pub text: String,
    /// Non-overlapping occurrences of the query in the text
    pub occurrences: usize,
}

/// A lexicon entry containing the query in at least one searchable field.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMatch<'a> {
    pub entry: &'a LexiconEntry,
    /// Relevance score; higher ranks first
    pub score: u32,
    /// Occurrences of the query across all searchable fields
    pub occurrences: usize,
}

/// What a search result points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ResultTarget {
    Verse(VerseAddress),
    Entry(String),
}

/// A display-ready result. Transient: recomputed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub target: ResultTarget,
    /// Human-readable label, e.g. `"Genesis 1:1"` or `"H430 ʼĕlôhîym"`
    pub label: String,
    /// Text cut for display
    pub snippet: String,
    /// Occurrence count for verses, relevance score for entries
    pub score: u32,
}
