//! Relevance scoring for lexicon matches.
//!
//! Every condition below is checked independently and the weights add up, so
//! an exact match also collects the matching "contains" weight (an id equal
//! to the query scores 100 + 70):
//!
//! | condition                          | weight |
//! |------------------------------------|--------|
//! | id equals query                    | 100    |
//! | original word equals query         | 90     |
//! | transliteration equals query       | 80     |
//! | id contains query                  | 70     |
//! | original word contains query       | 50     |
//! | transliteration contains query     | 30     |
//! | pronunciation contains query       | 20     |
//! | each definition line with query    | 10     |

use super::matcher::{contains_query, equals_query};
use super::types::{EntryMatch, Query};
use crate::config::{
    WEIGHT_DEFINITION_LINE, WEIGHT_ID_CONTAINS, WEIGHT_ID_EXACT, WEIGHT_ORIGINAL_CONTAINS,
    WEIGHT_ORIGINAL_EXACT, WEIGHT_PRONUNCIATION_CONTAINS, WEIGHT_TRANSLITERATION_CONTAINS,
    WEIGHT_TRANSLITERATION_EXACT,
};
use crate::lexicon::LexiconEntry;

/// Scores one entry against a normalized query.
pub fn relevance_score(entry: &LexiconEntry, query: &Query) -> u32 {
    let mut score = 0;

    if equals_query(&entry.id, query) {
        score += WEIGHT_ID_EXACT;
    }
    if equals_query(&entry.original, query) {
        score += WEIGHT_ORIGINAL_EXACT;
    }
    if equals_query(&entry.transliteration, query) {
        score += WEIGHT_TRANSLITERATION_EXACT;
    }
    if contains_query(&entry.id, query) {
        score += WEIGHT_ID_CONTAINS;
    }
    if contains_query(&entry.original, query) {
        score += WEIGHT_ORIGINAL_CONTAINS;
    }
    if contains_query(&entry.transliteration, query) {
        score += WEIGHT_TRANSLITERATION_CONTAINS;
    }
    if contains_query(&entry.pronunciation, query) {
        score += WEIGHT_PRONUNCIATION_CONTAINS;
    }

    let matching_lines = entry
        .definition
        .iter()
        .filter(|line| contains_query(line, query))
        .count() as u32;
    score + matching_lines * WEIGHT_DEFINITION_LINE
}

/// Orders matches by descending score.
///
/// The sort is stable: equal scores keep their incoming order, which for a
/// [`Lexicon`](crate::lexicon::Lexicon) is ascending Strong's number.
pub fn rank(matches: &mut [EntryMatch<'_>]) {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
}
