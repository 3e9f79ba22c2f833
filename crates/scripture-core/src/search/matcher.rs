//! Case-insensitive substring matching and occurrence counting.
//!
//! Matching is plain substring containment after case folding: no
//! tokenization, stemming or word boundaries. A verse matches `"begin"` if
//! it contains `"beginning"`.
//!
//! Counting is non-overlapping and left to right: after each hit the scan
//! resumes right after the matched text, so `"aaa"` contains `"aa"` once.

use super::types::Query;
use crate::text::fold_case;

/// Counts case-insensitive, non-overlapping occurrences of `needle`.
///
/// Returns 0 for an empty needle.
///
/// # Examples
///
/// ```
/// use scripture_core::search::count_occurrences;
///
/// assert_eq!(count_occurrences("the the the", "the"), 3);
/// assert_eq!(count_occurrences("aaa", "aa"), 1);
/// assert_eq!(count_occurrences("anything", ""), 0);
/// ```
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    count_folded(&fold_case(haystack), &fold_case(needle))
}

/// Counts occurrences of an already-normalized query.
pub fn count_query(haystack: &str, query: &Query) -> usize {
    count_folded(&fold_case(haystack), query.as_str())
}

/// Returns `true` if `haystack` contains the query, ignoring case.
pub fn contains_query(haystack: &str, query: &Query) -> bool {
    fold_case(haystack).contains(query.as_str())
}

/// Returns `true` if `field` equals the query, ignoring case.
pub fn equals_query(field: &str, query: &Query) -> bool {
    fold_case(field) == query.as_str()
}

/// Both arguments must already be case-folded.
pub(crate) fn count_folded(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    // `str::matches` scans left to right and never overlaps hits
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_repeated_word() {
        assert_eq!(count_occurrences("the the the", "the"), 3);
    }

    #[test]
    fn test_count_is_non_overlapping() {
        assert_eq!(count_occurrences("aaa", "aa"), 1);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
    }

    #[test]
    fn test_count_ignores_case() {
        assert_eq!(count_occurrences("The LORD and the lord", "lord"), 2);
        assert_eq!(count_occurrences("THE", "the"), 1);
    }

    #[test]
    fn test_count_empty_inputs() {
        assert_eq!(count_occurrences("", "the"), 0);
        assert_eq!(count_occurrences("text", ""), 0);
        assert_eq!(count_occurrences("", ""), 0);
    }

    #[test]
    fn test_count_no_match() {
        assert_eq!(count_occurrences("In the beginning", "end"), 0);
    }

    #[test]
    fn test_count_substring_inside_word() {
        assert_eq!(count_occurrences("beginning", "in"), 2);
    }

    #[test]
    fn test_query_helpers() {
        let query = Query::parse(" Light ").unwrap();
        assert!(contains_query("Let there be light", &query));
        assert!(!contains_query("darkness", &query));
        assert!(equals_query("LIGHT", &query));
        assert!(!equals_query("lights", &query));
        assert_eq!(count_query("light, Light, LIGHT", &query), 3);
    }

    #[test]
    fn test_count_non_ascii() {
        assert_eq!(count_occurrences("Λόγος λόγος", "λόγος"), 2);
    }
}
