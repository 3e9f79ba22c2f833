//! Strong's lexicon entries for Hebrew and Greek.
//!
//! A [`Lexicon`] is the combined, number-ordered list of entries parsed from
//! the Hebrew and Greek dictionary documents. Entries are immutable after
//! parsing and their ids (`H430`, `G3056`, ...) are unique across both
//! languages.
//!
//! Browsing helpers mirror the dictionary view: filter by language, filter by
//! the first letter of the transliteration, and re-sort a result list.

mod xml;

pub use xml::parse_strongs_xml;

use crate::config::PREVIEW_MAX_CHARS;
use crate::error::LexiconError;
use crate::text::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{info, instrument, warn};

/// Source language of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hebrew,
    Greek,
}

impl Language {
    /// Id prefix used by Strong's numbering.
    pub fn prefix(&self) -> char {
        match self {
            Language::Hebrew => 'H',
            Language::Greek => 'G',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Hebrew => "hebrew",
            Language::Greek => "greek",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One Strong's dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    /// `"H"` or `"G"` followed by the Strong's number
    pub id: String,
    pub number: u32,
    /// Word in the original script
    pub original: String,
    pub transliteration: String,
    pub pronunciation: String,
    pub lemma: String,
    pub morphology: String,
    pub gloss: String,
    /// Definition lines, in document order
    pub definition: Vec<String>,
    pub language: Language,
    /// Ids of related entries in the other language
    pub cross_references: BTreeSet<String>,
}

impl LexiconEntry {
    /// Builds the id for a number in a language, e.g. `H430`.
    pub fn make_id(language: Language, number: u32) -> String {
        format!("{}{}", language.prefix(), number)
    }

    /// Display title: the transliteration, or the original word if there is none.
    pub fn title(&self) -> &str {
        if self.transliteration.is_empty() {
            &self.original
        } else {
            &self.transliteration
        }
    }

    /// First definition line, cut for list previews.
    pub fn preview(&self) -> Option<String> {
        self.definition
            .first()
            .map(|line| truncate_chars(line, PREVIEW_MAX_CHARS))
    }

    /// Uppercase first letter of the transliteration, if it is `A`-`Z`.
    pub fn index_letter(&self) -> Option<char> {
        self.transliteration
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .filter(char::is_ascii_uppercase)
    }
}

/// Orderings offered when browsing a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Transliteration, A to Z
    #[default]
    NameAsc,
    /// Transliteration, Z to A
    NameDesc,
    /// Language name
    Type,
    /// Strong's number
    Number,
    /// Keep the incoming (ranked) order
    Relevance,
}

/// Sorts entries in place. Every mode is stable.
pub fn sort_entries(entries: &mut [&LexiconEntry], mode: SortMode) {
    match mode {
        SortMode::NameAsc => entries.sort_by(|a, b| compare_names(a, b)),
        SortMode::NameDesc => entries.sort_by(|a, b| compare_names(b, a)),
        SortMode::Type => entries.sort_by(|a, b| a.language.as_str().cmp(b.language.as_str())),
        SortMode::Number => entries.sort_by_key(|entry| entry.number),
        SortMode::Relevance => {}
    }
}

fn compare_names(a: &LexiconEntry, b: &LexiconEntry) -> std::cmp::Ordering {
    a.transliteration
        .to_lowercase()
        .cmp(&b.transliteration.to_lowercase())
}

/// Optional constraints applied before searching or listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconFilter {
    pub language: Option<Language>,
    /// Uppercase first letter of the transliteration
    pub letter: Option<char>,
}

impl LexiconFilter {
    pub fn language(language: Language) -> Self {
        Self {
            language: Some(language),
            letter: None,
        }
    }

    pub fn letter(letter: char) -> Self {
        Self {
            language: None,
            letter: Some(letter.to_ascii_uppercase()),
        }
    }

    pub fn matches(&self, entry: &LexiconEntry) -> bool {
        self.language.map_or(true, |lang| entry.language == lang)
            && self
                .letter
                .map_or(true, |letter| entry.index_letter() == Some(letter))
    }
}

/// The combined Hebrew and Greek dictionary.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Parses both dictionary documents and combines them.
    #[instrument(skip_all, fields(hebrew_len = hebrew_xml.len(), greek_len = greek_xml.len()))]
    pub fn from_sources(hebrew_xml: &str, greek_xml: &str) -> Result<Self, LexiconError> {
        let mut entries = parse_strongs_xml(hebrew_xml, Language::Hebrew)?;
        entries.extend(parse_strongs_xml(greek_xml, Language::Greek)?);
        let lexicon = Self::from_entries(entries);
        info!("Loaded {} lexicon entries", lexicon.len());
        Ok(lexicon)
    }

    /// Orders entries by Strong's number and drops duplicate ids.
    ///
    /// The sort is stable, so for equal numbers the incoming order (Hebrew
    /// before Greek when built by [`from_sources`](Self::from_sources)) is kept.
    pub fn from_entries(mut entries: Vec<LexiconEntry>) -> Self {
        entries.sort_by_key(|entry| entry.number);

        let mut seen = HashSet::new();
        entries.retain(|entry| {
            let fresh = seen.insert(entry.id.clone());
            if !fresh {
                warn!("Dropping duplicate lexicon entry {}", entry.id);
            }
            fresh
        });

        Self { entries }
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Looks an entry up by id, ignoring case (`h430` finds `H430`).
    pub fn get(&self, id: &str) -> Option<&LexiconEntry> {
        let id = id.trim();
        self.entries
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(id))
    }

    /// Entries passing `filter`, in lexicon order.
    pub fn filtered(&self, filter: &LexiconFilter) -> Vec<&LexiconEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .collect()
    }

    /// Distinct index letters present in the lexicon, sorted.
    pub fn available_letters(&self) -> Vec<char> {
        self.entries
            .iter()
            .filter_map(LexiconEntry::index_letter)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
