//! Study notes: titled plain-text notes with a category and free-form tags.
//!
//! This module holds the note model and its pure helpers. Persistence and
//! the current-note cursor live in
//! [`NotebookSession`](crate::session::NotebookSession).
//!
//! - `import`: shape sniffing and validation for imported note files

mod import;

pub use import::{parse_import, NotesExport};

use crate::config::{DEFAULT_NOTE_CATEGORY, UNTITLED_NOTE};
use crate::search::{contains_query, Query};
use serde::{Deserialize, Serialize};

/// One study note.
///
/// Word and character counts are derived from `content` whenever it
/// changes, so they are always in step with the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Seconds since the Unix epoch
    pub created: u64,
    /// Seconds since the Unix epoch
    pub modified: u64,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub char_count: usize,
}

impl Note {
    /// An empty "Untitled Note" in the default category.
    pub fn new(id: impl Into<String>, now: u64) -> Self {
        Self {
            id: id.into(),
            title: UNTITLED_NOTE.to_string(),
            content: String::new(),
            category: DEFAULT_NOTE_CATEGORY.to_string(),
            tags: Vec::new(),
            created: now,
            modified: now,
            word_count: 0,
            char_count: 0,
        }
    }

    /// Replaces title and content. A blank title becomes "Untitled Note".
    pub fn edit(&mut self, title: &str, content: &str, now: u64) {
        let title = title.trim();
        self.title = if title.is_empty() {
            UNTITLED_NOTE.to_string()
        } else {
            title.to_string()
        };
        self.content = content.to_string();
        self.recount();
        self.modified = now;
    }

    /// Adds a tag; returns `false` if it was blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag; returns `false` if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns `true` if the title, content or any tag contains the query,
    /// ignoring case.
    pub fn matches(&self, query: &Query) -> bool {
        contains_query(&self.title, query)
            || contains_query(&self.content, query)
            || self.tags.iter().any(|tag| contains_query(tag, query))
    }

    pub(crate) fn recount(&mut self) {
        self.word_count = count_words(&self.content);
        self.char_count = self.content.chars().count();
    }
}

/// Number of whitespace-separated words.
///
/// ```
/// use scripture_core::notes::count_words;
///
/// assert_eq!(count_words("  In the\tbeginning\n"), 3);
/// assert_eq!(count_words("   "), 0);
/// ```
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normalizes a category name: trimmed and lowercased. Blank names are
/// rejected.
pub fn normalize_category(name: &str) -> Option<String> {
    let name = name.trim().to_lowercase();
    (!name.is_empty()).then_some(name)
}

/// Current time in seconds since the Unix epoch.
pub(crate) fn now_secs() -> u64 {
    instant::SystemTime::now()
        .duration_since(instant::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current time in milliseconds since the Unix epoch, used for note ids.
pub(crate) fn now_millis() -> u128 {
    instant::SystemTime::now()
        .duration_since(instant::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
