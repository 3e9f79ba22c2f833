//! In-memory model of one loaded translation.
//!
//! A [`Corpus`] is an ordered list of [`Book`]s; a book is an ordered list of
//! chapters; a chapter is an ordered list of verse strings. Position is
//! identity: chapter index `c` is chapter `c + 1`, verse index `v` is verse
//! `v + 1`. Books are immutable once loaded, and switching translations
//! replaces the whole corpus.
//!
//! # Modules
//!
//! - `shape`: sniffing and normalizing the two accepted JSON encodings
//! - `source`: the async seam through which translation documents are fetched

mod shape;
mod source;

pub use shape::{detect_shape, normalize, Shape};
pub use source::{CorpusSource, InMemoryCorpusSource};

use crate::address::VerseAddress;
use crate::error::CorpusLoadError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Verses of one chapter, in order.
pub type Chapter = Vec<String>;

/// A named book and its chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    /// Short form of the name when the source supplies one (e.g. `"gn"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbrev: Option<String>,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn new(name: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            name: name.into(),
            abbrev: None,
            chapters,
        }
    }
}

/// One translation, normalized to positional books/chapters/verses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    books: Vec<Book>,
}

impl Corpus {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Parses and normalizes a translation document in either accepted shape.
    ///
    /// Fails with [`CorpusLoadError::Parse`] when the bytes are not JSON, and
    /// with the shape-specific errors of [`detect_shape`] / [`normalize`].
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CorpusLoadError> {
        let raw: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| CorpusLoadError::Parse(e.to_string()))?;
        let shape = detect_shape(&raw)?;
        let corpus = normalize(raw, shape)?;
        info!(
            "Loaded {:?} corpus with {} books, {} chapters",
            shape,
            corpus.len(),
            corpus.total_chapters()
        );
        Ok(corpus)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn chapter(&self, book: usize, chapter: usize) -> Option<&Chapter> {
        self.book(book)?.chapters.get(chapter)
    }

    /// Returns the text of a verse-level address.
    ///
    /// `None` for chapter-level addresses and for positions outside the corpus.
    pub fn verse(&self, address: &VerseAddress) -> Option<&str> {
        let verse = address.verse?;
        self.chapter(address.book, address.chapter)?
            .get(verse.checked_sub(1)?)
            .map(String::as_str)
    }

    /// Returns `true` if the address points at an existing chapter (and verse).
    pub fn contains(&self, address: &VerseAddress) -> bool {
        match address.verse {
            Some(_) => self.verse(address).is_some(),
            None => self.chapter(address.book, address.chapter).is_some(),
        }
    }

    /// Finds a book by name, case-insensitively.
    pub fn book_index(&self, name: &str) -> Option<usize> {
        self.books
            .iter()
            .position(|book| book.name.eq_ignore_ascii_case(name))
    }

    /// Total number of chapters across all books.
    pub fn total_chapters(&self) -> usize {
        self.books.iter().map(|book| book.chapters.len()).sum()
    }

    /// Human-readable reference, 1-based: `"Genesis 1"` or `"Genesis 1:1"`.
    pub fn reference_label(&self, address: &VerseAddress) -> Option<String> {
        let book = self.book(address.book)?;
        let chapter = address.chapter + 1;
        Some(match address.verse {
            Some(verse) => format!("{} {}:{}", book.name, chapter, verse),
            None => format!("{} {}", book.name, chapter),
        })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
