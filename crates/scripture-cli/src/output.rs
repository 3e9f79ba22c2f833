//! Output formatting for command results.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use crate::reader::{AnnotationKind, ChapterView, ProgressView, ToggleOutcome};
use crate::search::{Lookup, VerseSearch};
use scripture_core::search::SearchResult;
use serde::Serialize;

/// JSON output structure for a verse search
#[derive(Serialize)]
pub struct JsonVerseSearch<'a> {
    pub query: &'a str,
    pub translation: &'a str,
    /// Matching verses before the limit
    pub verse_count: usize,
    pub total_occurrences: usize,
    pub results: Vec<SearchResult>,
}

/// JSON output structure for a lexicon lookup
#[derive(Serialize)]
pub struct JsonLookup<'a> {
    pub query: &'a str,
    pub total: usize,
    pub results: &'a [SearchResult],
}

/// Serializes any command result as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn verse_search_json(query: &str, search: &VerseSearch, limit: usize) -> String {
    format_json(&JsonVerseSearch {
        query,
        translation: &search.translation,
        verse_count: search.results.len(),
        total_occurrences: search.results.total_occurrences(),
        results: search.results.to_results(limit),
    })
}

pub fn lookup_json(query: &str, lookup: &Lookup) -> String {
    format_json(&JsonLookup {
        query,
        total: lookup.total,
        results: &lookup.results,
    })
}

/// Formats verse search results for the terminal.
pub fn format_verse_search(query: &str, search: &VerseSearch, limit: usize) -> String {
    if search.results.is_empty() {
        return format!(
            "No verses found for \"{}\" in {}",
            query.trim(),
            search.translation
        );
    }

    let verses = search.results.len();
    let occurrences = search.results.total_occurrences();
    let mut output = format!(
        "Found {} occurrence{} in {} verse{} for \"{}\" ({}):\n\n",
        occurrences,
        plural(occurrences),
        verses,
        plural(verses),
        query.trim(),
        search.translation
    );

    output.push_str(&format_results(&search.results.to_results(limit)));
    if verses > limit {
        output.push_str(&format!("\n\n... and {} more", verses - limit));
    }
    output
}

/// Formats lexicon lookup results for the terminal.
pub fn format_lookup(query: &str, lookup: &Lookup) -> String {
    if lookup.results.is_empty() {
        return format!("No entries found for \"{}\"", query.trim());
    }

    let mut output = format!(
        "Found {} entr{} for \"{}\":\n\n",
        lookup.total,
        if lookup.total == 1 { "y" } else { "ies" },
        query.trim()
    );
    output.push_str(&format_results(&lookup.results));
    if lookup.total > lookup.results.len() {
        output.push_str(&format!(
            "\n\n... and {} more",
            lookup.total - lookup.results.len()
        ));
    }
    output
}

pub fn format_toggle(outcome: &ToggleOutcome) -> String {
    let noun = match outcome.kind {
        AnnotationKind::Bookmark => "Bookmark",
        AnnotationKind::Highlight => "Highlight",
    };
    let verb = if outcome.active { "added" } else { "removed" };
    format!("{} {}: {}", noun, verb, outcome.label)
}

pub fn format_chapter(view: &ChapterView) -> String {
    let mut output = format!("{} ({})\n\n", view.label, view.translation);
    for (i, verse) in view.verses.iter().enumerate() {
        output.push_str(&format!("{:>3} {}\n", i + 1, verse));
    }
    output.push_str(&format!(
        "\n{}% read ({} of {} chapters)",
        view.progress.percent, view.progress.chapters_read, view.progress.total_chapters
    ));
    output
}

pub fn format_progress(view: &ProgressView) -> String {
    let progress = &view.progress;
    format!(
        "{}: {}% read\n  Chapters read: {} of {}\n  Books started: {}",
        view.translation,
        progress.percent,
        progress.chapters_read,
        progress.total_chapters,
        progress.books_started
    )
}

fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let mut block = format!("{}. {} ({})", i + 1, result.label, result.score);
            if !result.snippet.is_empty() {
                block.push_str(&format!("\n   {}", result.snippet));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
