//! Verse search over a loaded [`Corpus`].
//!
//! Verse results are never re-ranked: corpus order (book, chapter, verse
//! ascending) is their relevance.

use super::matcher::count_query;
use super::navigator::{MatchNavigator, OccurrencePosition};
use super::types::{Query, ResultTarget, SearchResult, VerseMatch};
use crate::address::VerseAddress;
use crate::config::SNIPPET_MAX_CHARS;
use crate::corpus::Corpus;
use crate::text::truncate_chars;
use tracing::{debug, instrument};

/// Every verse matching a query, in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerseSearchResults {
    matches: Vec<VerseMatch>,
    total_occurrences: usize,
}

impl VerseSearchResults {
    pub fn matches(&self) -> &[VerseMatch] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<VerseMatch> {
        self.matches
    }

    /// Sum of occurrence counts over all matching verses.
    pub fn total_occurrences(&self) -> usize {
        self.total_occurrences
    }

    /// Number of matching verses.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Display results for the first `limit` matches, snippets cut to
    /// [`SNIPPET_MAX_CHARS`].
    pub fn to_results(&self, limit: usize) -> Vec<SearchResult> {
        self.matches
            .iter()
            .take(limit)
            .map(|m| SearchResult {
                target: ResultTarget::Verse(m.address),
                label: format!(
                    "{} {}:{}",
                    m.book_name,
                    m.address.chapter + 1,
                    m.address.verse.unwrap_or_default()
                ),
                snippet: truncate_chars(&m.text, SNIPPET_MAX_CHARS),
                score: u32::try_from(m.occurrences).unwrap_or(u32::MAX),
            })
            .collect()
    }

    /// A navigator over every individual occurrence, in reading order.
    pub fn navigator(&self) -> MatchNavigator {
        let positions = self
            .matches
            .iter()
            .flat_map(|m| {
                (0..m.occurrences).map(move |occurrence| OccurrencePosition {
                    address: m.address,
                    occurrence,
                })
            })
            .collect();
        MatchNavigator::new(positions)
    }
}

/// Finds every verse containing `query` (case-insensitive substring).
///
/// The query is trimmed first; a blank query returns no results without
/// scanning the corpus. Matches carry 1-based verse numbers.
///
/// # Examples
///
/// ```
/// use scripture_core::corpus::{Book, Corpus};
/// use scripture_core::search::search_verses;
///
/// let corpus = Corpus::new(vec![Book::new(
///     "Genesis",
///     vec![vec![
///         "In the beginning God created the heaven and the earth.".to_string(),
///         "And the earth was without form, and void.".to_string(),
///     ]],
/// )]);
///
/// let results = search_verses(&corpus, "beginning");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results.matches()[0].address.key(), "0-0-1");
/// assert_eq!(results.matches()[0].occurrences, 1);
/// ```
#[instrument(skip_all, fields(query_len = query.len()))]
pub fn search_verses(corpus: &Corpus, query: &str) -> VerseSearchResults {
    let Some(query) = Query::parse(query) else {
        return VerseSearchResults::default();
    };

    let mut matches = Vec::new();
    let mut total_occurrences = 0;

    for (book_index, book) in corpus.books().iter().enumerate() {
        for (chapter_index, chapter) in book.chapters.iter().enumerate() {
            for (verse_index, text) in chapter.iter().enumerate() {
                let occurrences = count_query(text, &query);
                if occurrences == 0 {
                    continue;
                }
                total_occurrences += occurrences;
                matches.push(VerseMatch {
                    address: VerseAddress::verse(book_index, chapter_index, verse_index + 1),
                    book_name: book.name.clone(),
                    text: text.clone(),
                    occurrences,
                });
            }
        }
    }

    debug!(
        "Verse search matched {} verses ({} occurrences)",
        matches.len(),
        total_occurrences
    );

    VerseSearchResults {
        matches,
        total_occurrences,
    }
}
