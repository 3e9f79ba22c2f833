use super::{normalize_category, Note};
use crate::config::{DEFAULT_NOTE_CATEGORY, NOTES_EXPORT_VERSION};
use crate::error::NotebookError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Whole-notebook export document. Its `notes` field is one of the shapes
/// [`parse_import`] accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesExport {
    pub notes: Vec<Note>,
    pub categories: Vec<String>,
    /// Seconds since the Unix epoch
    pub exported: u64,
    pub version: String,
}

impl NotesExport {
    pub fn new(notes: Vec<Note>, categories: Vec<String>, exported: u64) -> Self {
        Self {
            notes,
            categories,
            exported,
            version: NOTES_EXPORT_VERSION.to_string(),
        }
    }
}

/// Parses an imported notes file.
///
/// Three shapes are recognized:
/// - an array of notes
/// - an object with a `notes` array (a whole-notebook export)
/// - a single note object carrying `id` and `title`
///
/// A note is kept when it has a non-blank `title` and a `content` field;
/// anything else is skipped. Kept notes get fresh ids from `next_id`, a
/// `modified` time of `now`, and counts recomputed from their content.
/// Missing categories fall back to the default and a missing `created`
/// time to `now`.
///
/// Returns [`NotebookError::InvalidImport`] when the text is not JSON and
/// [`NotebookError::NoValidNotes`] when nothing survives validation.
pub fn parse_import<F>(raw: &str, now: u64, mut next_id: F) -> Result<Vec<Note>, NotebookError>
where
    F: FnMut() -> String,
{
    let document: Value =
        serde_json::from_str(raw).map_err(|e| NotebookError::InvalidImport(e.to_string()))?;

    let candidates: Vec<&Value> = match &document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("notes") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ if map.contains_key("id") && has_title(&document) => vec![&document],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let total = candidates.len();
    let notes: Vec<Note> = candidates
        .into_iter()
        .filter_map(|item| import_note(item, now, &mut next_id))
        .collect();
    debug!("Imported {} of {} candidate notes", notes.len(), total);

    if notes.is_empty() {
        return Err(NotebookError::NoValidNotes);
    }
    Ok(notes)
}

fn has_title(item: &Value) -> bool {
    item.get("title")
        .and_then(Value::as_str)
        .is_some_and(|title| !title.trim().is_empty())
}

fn import_note<F>(item: &Value, now: u64, next_id: &mut F) -> Option<Note>
where
    F: FnMut() -> String,
{
    if !has_title(item) {
        return None;
    }
    let content = item.get("content")?;

    let mut note = Note::new(next_id(), now);
    note.title = item.get("title")?.as_str()?.trim().to_string();
    note.content = content.as_str().unwrap_or_default().to_string();
    note.category = item
        .get("category")
        .and_then(Value::as_str)
        .and_then(normalize_category)
        .unwrap_or_else(|| DEFAULT_NOTE_CATEGORY.to_string());
    if let Some(tags) = item.get("tags").and_then(Value::as_array) {
        for tag in tags.iter().filter_map(Value::as_str) {
            note.add_tag(tag);
        }
    }
    note.created = item.get("created").and_then(Value::as_u64).unwrap_or(now);
    note.recount();
    Some(note)
}
