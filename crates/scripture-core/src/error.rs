//! Error types for scripture-core.
//!
//! This module defines the error types shared across the core library:
//! address decoding, corpus loading, lexicon parsing, note import and the
//! session adapters that tie them to persistence.

use crate::storage::StoreError;
use thiserror::Error;

/// Errors that can occur while decoding a chapter or verse key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The key does not have the `book-chapter[-verse]` form
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key, verbatim
        key: String,
        /// What was wrong with it
        reason: String,
    },
}

impl AddressError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        AddressError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while fetching or normalizing a translation.
///
/// Loading is all-or-nothing: when any of these is returned, the caller's
/// previously loaded corpus stays authoritative.
#[derive(Debug, Clone, Error)]
pub enum CorpusLoadError {
    /// The translation document could not be fetched
    #[error("Failed to fetch translation {translation:?}: {message}")]
    Fetch {
        /// Translation identifier that was requested
        translation: String,
        /// Underlying failure
        message: String,
    },
    /// The payload is not valid JSON
    #[error("Translation is not valid JSON: {0}")]
    Parse(String),
    /// The payload is JSON but neither a list of books nor a map of books
    #[error("Unrecognized translation shape: {0}")]
    UnrecognizedShape(String),
    /// The payload has a recognized shape but its content is malformed
    #[error("Malformed translation: {0}")]
    Malformed(String),
}

/// Errors that can occur while loading a Strong's lexicon document.
///
/// Individual malformed entries are never reported here; they are dropped
/// and logged. Only a document that is not well-formed XML fails the load.
#[derive(Debug, Clone, Error)]
pub enum LexiconError {
    /// XML syntax error at the given byte position
    #[error("XML error at position {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader message
        message: String,
    },
}

/// Errors surfaced by the reader and dictionary sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Corpus fetch or normalization failed
    #[error(transparent)]
    Corpus(#[from] CorpusLoadError),
    /// Persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No corpus has been loaded yet
    #[error("No translation loaded")]
    NoCorpus,
    /// Requested book or chapter is outside the loaded corpus
    #[error("Position out of range: book {book}, chapter {chapter}")]
    OutOfRange {
        /// Zero-based book index
        book: usize,
        /// Zero-based chapter index
        chapter: usize,
    },
    /// Requested translation id is not in the registry
    #[error("Unknown translation: {0}")]
    UnknownTranslation(String),
}

/// Errors surfaced by the study notebook.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// Persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No note has the given id
    #[error("Note not found: {0}")]
    NotFound(String),
    /// The notebook always keeps at least one note
    #[error("Cannot delete the only note")]
    LastNote,
    /// Imported text is not JSON
    #[error("Invalid import file: {0}")]
    InvalidImport(String),
    /// Imported document held no note with a title and content
    #[error("No valid notes found in import")]
    NoValidNotes,
}
