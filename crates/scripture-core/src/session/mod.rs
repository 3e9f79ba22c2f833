//! Session adapters: explicit application state over a key-value store.
//!
//! A session owns everything one reader, dictionary or notebook needs: the
//! loaded data, the annotation sets and the store they persist to. State is
//! restored when the session opens and written through after every mutation,
//! one key at a time.
//!
//! Restoring is tolerant. A value that fails to decode is logged and replaced
//! with its default; only store I/O failures are returned to the caller.
//!
//! - `reader`: [`ReaderSession`], translation + position + annotations
//! - `dictionary`: [`DictionarySession`], lexicon + favourites + history
//! - `notebook`: [`NotebookSession`], study notes + categories

mod dictionary;
mod notebook;
mod reader;

pub use dictionary::DictionarySession;
pub use notebook::NotebookSession;
pub use reader::{ReaderSession, ReadingPosition};

use crate::address::VerseAddress;
use crate::annotations::AnnotationSet;
use crate::storage::{load_json, KeyValueStore, StoreError};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Loads a JSON value, falling back to the default when it is missing or
/// does not decode.
pub(crate) fn restore<T, S>(store: &S, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match load_json(store, key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(StoreError::Serialization { key, message }) => {
            warn!("Discarding corrupt stored value for {:?}: {}", key, message);
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Loads an address set key by key, so one undecodable key only drops
/// itself.
pub(crate) fn restore_addresses<S>(
    store: &S,
    key: &str,
) -> Result<AnnotationSet<VerseAddress>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let keys: Vec<String> = restore(store, key)?;
    Ok(AnnotationSet::from_keys(keys))
}
