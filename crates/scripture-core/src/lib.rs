//! # Scripture Core
//!
//! Platform-independent library for reading, annotating and searching Bible
//! translations and the Strong's Hebrew/Greek lexicon.
//!
//! Everything here works on data already resident in memory. The only
//! suspension point is fetching a translation document through a
//! [`corpus::CorpusSource`]; persistence goes through the synchronous
//! [`storage::KeyValueStore`] collaborator.
//!
//! ## Modules
//!
//! - [`address`] - Composite chapter/verse keys (`"0-0"`, `"0-0-1"`)
//! - [`corpus`] - Translation model and JSON shape normalization
//! - [`lexicon`] - Strong's entries, XML parsing, browse filters and sorts
//! - [`search`] - Substring matching, occurrence counting, relevance ranking
//! - [`annotations`] - Bookmark/highlight/progress sets and search history
//! - [`notes`] - Study notes, word counts and note import
//! - [`session`] - Reader, dictionary and notebook state over a key-value store
//! - [`storage`] - Key-value persistence trait and in-memory store
//! - [`config`] - Constants, weights, translation registry, storage keys
//! - [`error`] - Error types for decoding, loading and sessions

pub mod address;
pub mod annotations;
pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod notes;
pub mod search;
pub mod session;
pub mod storage;
pub mod text;
