//! Production configuration constants.
//!
//! This module contains the constants that define how results are capped,
//! how snippets are cut, how lexicon matches are weighted, and which keys
//! the persistence layer uses. They are shared by the core, the CLI and the
//! benchmarks so every surface agrees on the same values.
//!
//! # Usage
//!
//! ```
//! use scripture_core::config::{DEFAULT_RESULT_LIMIT, SNIPPET_MAX_CHARS};
//!
//! assert_eq!(DEFAULT_RESULT_LIMIT, 20);
//! assert_eq!(SNIPPET_MAX_CHARS, 100);
//! ```

// =============================================================================
// Result Presentation
// =============================================================================

/// Maximum number of search results handed to a display surface.
///
/// Matching itself is never capped; only the list produced for display is.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Maximum characters of verse text shown in a search result snippet.
pub const SNIPPET_MAX_CHARS: usize = 100;

/// Maximum characters of the first definition line shown as an entry preview.
pub const PREVIEW_MAX_CHARS: usize = 150;

/// Number of queries kept in the dictionary's recent-search history.
pub const RECENT_SEARCH_LIMIT: usize = 10;

// =============================================================================
// Lexicon Relevance Weights
// =============================================================================

/// Entry id equals the query.
pub const WEIGHT_ID_EXACT: u32 = 100;
/// Original-language word equals the query.
pub const WEIGHT_ORIGINAL_EXACT: u32 = 90;
/// Transliteration equals the query.
pub const WEIGHT_TRANSLITERATION_EXACT: u32 = 80;
/// Entry id contains the query.
pub const WEIGHT_ID_CONTAINS: u32 = 70;
/// Original-language word contains the query.
pub const WEIGHT_ORIGINAL_CONTAINS: u32 = 50;
/// Transliteration contains the query.
pub const WEIGHT_TRANSLITERATION_CONTAINS: u32 = 30;
/// Pronunciation contains the query.
pub const WEIGHT_PRONUNCIATION_CONTAINS: u32 = 20;
/// Added once for every definition line that contains the query.
pub const WEIGHT_DEFINITION_LINE: u32 = 10;

// =============================================================================
// Translations
// =============================================================================

/// Translation loaded when nothing (or something unknown) was persisted.
pub const DEFAULT_TRANSLATION: &str = "kjv";

/// Known translations as `(id, display name)` pairs.
///
/// A persisted translation id is only honoured if it appears here.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("kjv", "KJV - King James Version"),
    ("bbe", "BBE - Bible in Basic English"),
    ("amp", "AMP - Amplified Bible"),
    ("nlt", "NLT - New Living Translation"),
    ("niv", "NIV - New International Version"),
    ("msg", "MSG - The Message"),
    ("asv", "ASV - American Standard Version"),
    ("gn", "GNT - Good News Translation"),
];

/// Returns the display name of a known translation.
pub fn translation_name(id: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}

// =============================================================================
// Study Notes
// =============================================================================

/// Categories a fresh notebook starts with.
pub const DEFAULT_NOTE_CATEGORIES: &[&str] =
    &["bible-study", "sermon", "prayer", "devotional", "personal"];

/// Category given to new notes and to imported notes without one.
pub const DEFAULT_NOTE_CATEGORY: &str = "bible-study";

/// Title used when a note's title is blank.
pub const UNTITLED_NOTE: &str = "Untitled Note";

/// Format version written into notebook exports.
pub const NOTES_EXPORT_VERSION: &str = "1.0";

// =============================================================================
// Persistence Keys
// =============================================================================

/// Fixed keys under which session state round-trips through the
/// key-value store. Values are JSON-encoded.
pub mod keys {
    /// Current translation id (plain string).
    pub const TRANSLATION: &str = "bible-translation";
    /// Current `{bookIndex, chapterIndex}` position.
    pub const POSITION: &str = "bible-position";
    /// Bookmarked chapter keys.
    pub const CHAPTER_BOOKMARKS: &str = "bible-bookmarks";
    /// Bookmarked verse keys.
    pub const VERSE_BOOKMARKS: &str = "bible-verse-bookmarks";
    /// Highlighted verse keys.
    pub const HIGHLIGHTS: &str = "bible-highlights";
    /// Read chapter keys.
    pub const READ_CHAPTERS: &str = "bible-progress";
    /// Favourite lexicon entry ids.
    pub const FAVORITES: &str = "dictionary-favorites";
    /// Recent dictionary searches.
    pub const RECENT_SEARCHES: &str = "dictionary-recent";
    /// Study notes, newest first.
    pub const NOTES: &str = "study-notes";
    /// Note category names.
    pub const NOTE_CATEGORIES: &str = "notepad-categories";
}
