//! User annotations: bookmarks, highlights, read markers and favourites.
//!
//! Every annotation kind is a set of keys with idempotent membership
//! operations. Sets persist as JSON arrays of key strings.
//!
//! - `progress`: reading statistics derived from the read-chapter set
//! - `recent`: bounded history of dictionary queries

mod progress;
mod recent;

pub use progress::ReadingProgress;
pub use recent::{RecentSearch, RecentSearches};

use crate::address::{decode, VerseAddress};
use crate::error::AddressError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::warn;

/// A set of annotation keys.
///
/// `K` is [`VerseAddress`] for bookmarks, highlights and read chapters, and
/// `String` (an entry id) for lexicon favourites. Callers must not rely on
/// iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet<K: Ord> {
    keys: BTreeSet<K>,
}

impl<K: Ord> Default for AnnotationSet<K> {
    fn default() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }
}

impl<K: Ord> AnnotationSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Adds `key`. Adding a present key is a no-op; returns whether the set
    /// changed.
    pub fn add(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Removes `key`. Removing an absent key is a no-op; returns whether the
    /// set changed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    /// Flips membership and returns the new state (`true` = now present).
    pub fn toggle(&mut self, key: K) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Ord> FromIterator<K> for AnnotationSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord> Extend<K> for AnnotationSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl AnnotationSet<VerseAddress> {
    /// Builds a set from stored key strings, dropping keys that don't decode.
    ///
    /// Used when restoring persisted state, where one bad key must not cost
    /// the rest of the set.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| match decode(key.as_ref()) {
                Ok(address) => Some(address),
                Err(e) => {
                    warn!("Dropping stored annotation: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Number of distinct books among the addresses.
    pub fn distinct_books(&self) -> usize {
        self.keys
            .iter()
            .map(|address| address.book)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Addresses belonging to one chapter (the chapter key itself and any of
    /// its verses).
    pub fn in_chapter(&self, book: usize, chapter: usize) -> impl Iterator<Item = &VerseAddress> {
        self.keys
            .iter()
            .filter(move |address| address.book == book && address.chapter == chapter)
    }
}

/// Decodes every key and counts distinct book indices.
///
/// Fails on the first key that doesn't decode.
///
/// # Examples
///
/// ```
/// use scripture_core::annotations::count_distinct_books;
///
/// assert_eq!(count_distinct_books(["0-0", "0-1", "3-0"]).unwrap(), 2);
/// assert!(count_distinct_books(["0-x"]).is_err());
/// ```
pub fn count_distinct_books<I, S>(keys: I) -> Result<usize, AddressError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut books = HashSet::new();
    for key in keys {
        books.insert(decode(key.as_ref())?.book);
    }
    Ok(books.len())
}
