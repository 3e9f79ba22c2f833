//! Composite chapter and verse keys.
//!
//! Every annotation (bookmark, highlight, read marker) is identified by a
//! short string key built from positional indices:
//!
//! - chapter key: `"{book}-{chapter}"`, both zero-based
//! - verse key: `"{book}-{chapter}-{verse}"`, verse is 1-based
//!
//! [`VerseAddress`] is the typed form of those keys. Its string form is its
//! identity: it is what gets stored in sets and written to persistence, so
//! encoding and decoding must round-trip exactly.
//!
//! ```
//! use scripture_core::address::{decode, encode_verse_key, VerseAddress};
//!
//! let key = encode_verse_key(0, 0, 1);
//! assert_eq!(key, "0-0-1");
//! assert_eq!(decode(&key).unwrap(), VerseAddress::verse(0, 0, 1));
//! ```

use crate::error::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DELIMITER: char = '-';

/// A chapter or verse location inside a corpus.
///
/// `book` and `chapter` are zero-based positional indices. `verse` is the
/// 1-based verse number, absent for a chapter-level address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseAddress {
    pub book: usize,
    pub chapter: usize,
    pub verse: Option<usize>,
}

impl VerseAddress {
    /// Creates a chapter-level address.
    pub fn chapter(book: usize, chapter: usize) -> Self {
        Self {
            book,
            chapter,
            verse: None,
        }
    }

    /// Creates a verse-level address. `verse` is 1-based.
    pub fn verse(book: usize, chapter: usize, verse: usize) -> Self {
        Self {
            book,
            chapter,
            verse: Some(verse),
        }
    }

    /// Returns the chapter this address belongs to.
    pub fn chapter_key(&self) -> Self {
        Self::chapter(self.book, self.chapter)
    }

    /// Returns `true` for a verse-level address.
    pub fn is_verse(&self) -> bool {
        self.verse.is_some()
    }

    /// Encodes the address as its key string.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verse {
            Some(verse) => write!(f, "{}-{}-{}", self.book, self.chapter, verse),
            None => write!(f, "{}-{}", self.book, self.chapter),
        }
    }
}

impl FromStr for VerseAddress {
    type Err = AddressError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        decode(key)
    }
}

impl TryFrom<String> for VerseAddress {
    type Error = AddressError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        decode(&key)
    }
}

impl From<VerseAddress> for String {
    fn from(address: VerseAddress) -> String {
        address.to_string()
    }
}

/// Encodes a chapter key, `"{book}-{chapter}"`.
pub fn encode_chapter_key(book: usize, chapter: usize) -> String {
    VerseAddress::chapter(book, chapter).to_string()
}

/// Encodes a verse key, `"{book}-{chapter}-{verse}"`.
pub fn encode_verse_key(book: usize, chapter: usize, verse: usize) -> String {
    VerseAddress::verse(book, chapter, verse).to_string()
}

/// Decodes a chapter or verse key.
///
/// Fails with [`AddressError::InvalidKey`] when the key does not have two or
/// three segments, or when any segment is not a canonical decimal integer
/// (empty, signed, non-digit, or with a leading zero). A verse segment of
/// `0` is rejected because verses are numbered from 1.
pub fn decode(key: &str) -> Result<VerseAddress, AddressError> {
    let segments: Vec<&str> = key.split(DELIMITER).collect();
    if !(2..=3).contains(&segments.len()) {
        return Err(AddressError::invalid(
            key,
            format!("expected 2 or 3 segments, found {}", segments.len()),
        ));
    }

    let book = parse_segment(key, segments[0])?;
    let chapter = parse_segment(key, segments[1])?;
    let verse = match segments.get(2) {
        Some(segment) => {
            let verse = parse_segment(key, segment)?;
            if verse == 0 {
                return Err(AddressError::invalid(key, "verse numbers start at 1"));
            }
            Some(verse)
        }
        None => None,
    };

    Ok(VerseAddress {
        book,
        chapter,
        verse,
    })
}

fn parse_segment(key: &str, segment: &str) -> Result<usize, AddressError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::invalid(
            key,
            format!("segment {:?} is not numeric", segment),
        ));
    }
    // Leading zeros would give two different keys for one address
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(AddressError::invalid(
            key,
            format!("segment {:?} has a leading zero", segment),
        ));
    }
    segment
        .parse()
        .map_err(|e| AddressError::invalid(key, format!("segment {:?}: {}", segment, e)))
}
