//! Shape sniffing and normalization for translation documents.
//!
//! Two JSON encodings of a translation are accepted:
//!
//! - **ListShape**: `[{"name": "Genesis", "chapters": [["v1", "v2"], ...]}, ...]`
//! - **MapShape**: `{"Genesis": {"1": {"1": "v1", "2": "v2"}, ...}, ...}`
//!
//! Both normalize to the same positional [`Corpus`]. MapShape chapter and
//! verse keys are ordered numerically, so `"10"` follows `"9"`.

use super::{Book, Chapter, Corpus};
use crate::error::CorpusLoadError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The JSON encoding a translation document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Top-level array of `{name, chapters}` books
    List,
    /// Top-level object of book name → chapter number → verse number → text
    Map,
}

/// Determines which of the accepted encodings a document uses.
///
/// An array is [`Shape::List`]. An object is [`Shape::Map`] when its first
/// value is itself an object. Anything else is
/// [`CorpusLoadError::UnrecognizedShape`].
pub fn detect_shape(raw: &Value) -> Result<Shape, CorpusLoadError> {
    match raw {
        Value::Array(_) => Ok(Shape::List),
        Value::Object(books) => match books.values().next() {
            Some(Value::Object(_)) => Ok(Shape::Map),
            Some(other) => Err(CorpusLoadError::UnrecognizedShape(format!(
                "book values must be objects, found {}",
                type_name(other)
            ))),
            None => Err(CorpusLoadError::UnrecognizedShape(
                "empty object".to_string(),
            )),
        },
        other => Err(CorpusLoadError::UnrecognizedShape(format!(
            "top-level {} is neither a list nor a map of books",
            type_name(other)
        ))),
    }
}

/// Normalizes a document of the given shape into a [`Corpus`].
///
/// For [`Shape::Map`], chapter and verse keys that are not integers are
/// dropped, as are verses whose text is empty or not a string and chapters
/// left with no verses. A book whose value is not an object fails the
/// whole load.
pub fn normalize(raw: Value, shape: Shape) -> Result<Corpus, CorpusLoadError> {
    match shape {
        Shape::List => {
            let books: Vec<Book> = serde_json::from_value(raw)
                .map_err(|e| CorpusLoadError::Malformed(e.to_string()))?;
            Ok(Corpus::new(books))
        }
        Shape::Map => match raw {
            Value::Object(books) => normalize_map(books),
            other => Err(CorpusLoadError::Malformed(format!(
                "expected a map of books, found {}",
                type_name(&other)
            ))),
        },
    }
}

fn normalize_map(books: Map<String, Value>) -> Result<Corpus, CorpusLoadError> {
    let mut normalized = Vec::with_capacity(books.len());

    for (name, book) in books {
        let chapters = match book {
            Value::Object(chapters) => chapters,
            other => {
                return Err(CorpusLoadError::Malformed(format!(
                    "book {:?} is {}, expected an object of chapters",
                    name,
                    type_name(&other)
                )))
            }
        };

        let mut dropped = 0usize;
        let mut ordered: Vec<Chapter> = Vec::new();

        for (_, chapter) in sort_numeric_keys(chapters, &mut dropped) {
            let verses = match chapter {
                Value::Object(verses) => verses,
                _ => {
                    dropped += 1;
                    continue;
                }
            };

            let chapter: Chapter = sort_numeric_keys(verses, &mut dropped)
                .into_iter()
                .filter_map(|(_, verse)| match verse {
                    Value::String(text) if !text.is_empty() => Some(text),
                    _ => None,
                })
                .collect();

            if !chapter.is_empty() {
                ordered.push(chapter);
            }
        }

        if dropped > 0 {
            warn!("Dropped {} non-numeric or malformed keys in {:?}", dropped, name);
        }
        debug!("Normalized {:?} with {} chapters", name, ordered.len());

        normalized.push(Book::new(name, ordered));
    }

    Ok(Corpus::new(normalized))
}

/// Orders an object's entries by the integer value of their keys.
///
/// Keys that do not parse are counted into `dropped`. When two keys parse to
/// the same number, the first one in document order wins.
fn sort_numeric_keys(entries: Map<String, Value>, dropped: &mut usize) -> Vec<(u64, Value)> {
    let mut ordered = BTreeMap::new();
    for (key, value) in entries {
        match key.trim().parse::<u64>() {
            Ok(number) => {
                ordered.entry(number).or_insert(value);
            }
            Err(_) => *dropped += 1,
        }
    }
    ordered.into_iter().collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
