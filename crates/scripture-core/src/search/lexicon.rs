//! Lexicon search: match, score, rank.

use super::matcher::count_query;
use super::ranking::{rank, relevance_score};
use super::types::{EntryMatch, Query, ResultTarget, SearchResult};
use crate::lexicon::LexiconEntry;
use tracing::{debug, instrument};

/// Occurrences of the query across the searchable fields of an entry:
/// original word, transliteration, pronunciation, lemma and every definition
/// line. Zero means the entry does not match.
fn entry_occurrences(entry: &LexiconEntry, query: &Query) -> usize {
    [
        &entry.original,
        &entry.transliteration,
        &entry.pronunciation,
        &entry.lemma,
    ]
    .into_iter()
    .chain(entry.definition.iter())
    .map(|field| count_query(field, query))
    .sum()
}

/// Finds entries containing `query` and ranks them by relevance.
///
/// `entries` is typically a [`Lexicon`](crate::lexicon::Lexicon) slice or a
/// filtered view of one; its order breaks ties. A blank query returns no
/// results.
///
/// # Examples
///
/// ```
/// use scripture_core::lexicon::Lexicon;
/// use scripture_core::search::search_lexicon;
///
/// let lexicon = Lexicon::from_entries(Vec::new());
/// assert!(search_lexicon(lexicon.entries(), "logos").is_empty());
/// ```
#[instrument(skip_all, fields(query_len = query.len()))]
pub fn search_lexicon<'a, I>(entries: I, query: &str) -> Vec<EntryMatch<'a>>
where
    I: IntoIterator<Item = &'a LexiconEntry>,
{
    let Some(query) = Query::parse(query) else {
        return Vec::new();
    };

    let mut matches: Vec<EntryMatch<'a>> = entries
        .into_iter()
        .filter_map(|entry| {
            let occurrences = entry_occurrences(entry, &query);
            (occurrences > 0).then(|| EntryMatch {
                entry,
                score: relevance_score(entry, &query),
                occurrences,
            })
        })
        .collect();

    rank(&mut matches);
    debug!("Lexicon search matched {} entries", matches.len());
    matches
}

/// Display results for the first `limit` ranked matches.
pub fn entry_results(matches: &[EntryMatch<'_>], limit: usize) -> Vec<SearchResult> {
    matches
        .iter()
        .take(limit)
        .map(|m| SearchResult {
            target: ResultTarget::Entry(m.entry.id.clone()),
            label: format!("{} {}", m.entry.id, m.entry.title()),
            snippet: m.entry.preview().unwrap_or_default(),
            score: m.score,
        })
        .collect()
}
