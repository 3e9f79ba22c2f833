use super::restore;
use crate::config::{keys, DEFAULT_NOTE_CATEGORIES, DEFAULT_NOTE_CATEGORY};
use crate::error::NotebookError;
use crate::notes::{normalize_category, now_millis, now_secs, parse_import, Note, NotesExport};
use crate::search::Query;
use crate::storage::{save_json, KeyValueStore};
use tracing::{debug, info};

/// State of one study notebook: the notes, the category list and the note
/// being edited.
///
/// The notebook is never empty. Opening an empty store creates a first
/// note, deleting the last note is refused and clearing leaves one fresh
/// note behind. Every change is written to the store before it is applied,
/// so a failed write leaves the notebook as it was.
#[derive(Debug)]
pub struct NotebookSession<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
    categories: Vec<String>,
    current: String,
    last_id: u128,
}

impl<S: KeyValueStore> NotebookSession<S> {
    /// Restores notes and categories from `store` and selects the newest
    /// note.
    pub fn open(store: S) -> Result<Self, NotebookError> {
        let notes: Vec<Note> = restore(&store, keys::NOTES)?;
        let categories = restore::<Option<Vec<String>>, _>(&store, keys::NOTE_CATEGORIES)?
            .unwrap_or_else(|| DEFAULT_NOTE_CATEGORIES.iter().map(|c| c.to_string()).collect());
        let last_id = notes
            .iter()
            .filter_map(|note| note.id.parse::<u128>().ok())
            .max()
            .unwrap_or(0);

        let mut session = Self {
            current: notes.first().map(|note| note.id.clone()).unwrap_or_default(),
            store,
            notes,
            categories,
            last_id,
        };
        if session.notes.is_empty() {
            session.create_note()?;
        }
        debug!("Opened notebook with {} notes", session.notes.len());
        Ok(session)
    }

    /// Notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// The note being edited.
    pub fn current(&self) -> Option<&Note> {
        self.get(&self.current)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Makes `id` the current note.
    pub fn select(&mut self, id: &str) -> Result<&Note, NotebookError> {
        let index = self.index_of(id)?;
        self.current = id.to_string();
        Ok(&self.notes[index])
    }

    /// Adds an empty note at the front and makes it current.
    pub fn create_note(&mut self) -> Result<&Note, NotebookError> {
        let note = Note::new(self.mint_id(), now_secs());
        self.insert_front(vec![note])
    }

    /// Replaces a note's title and content, recounting words and characters.
    pub fn update_note(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<&Note, NotebookError> {
        self.modify(id, |note| {
            note.edit(title, content, now_secs());
            true
        })?;
        self.existing(id)
    }

    /// Moves a note to another category. A blank name means the default
    /// category.
    pub fn set_category(&mut self, id: &str, category: &str) -> Result<(), NotebookError> {
        let category =
            normalize_category(category).unwrap_or_else(|| DEFAULT_NOTE_CATEGORY.to_string());
        self.modify(id, |note| {
            if note.category == category {
                return false;
            }
            note.category = category;
            true
        })?;
        Ok(())
    }

    /// Adds a tag to a note; returns `false` if it was blank or already
    /// there.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<bool, NotebookError> {
        self.modify(id, |note| note.add_tag(tag))
    }

    /// Removes a tag from a note; returns `false` if it was not there.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<bool, NotebookError> {
        self.modify(id, |note| note.remove_tag(tag))
    }

    /// Deletes a note. Deleting the current note selects its neighbour: the
    /// note before it, or the next one when it was first.
    pub fn delete_note(&mut self, id: &str) -> Result<(), NotebookError> {
        if self.notes.len() <= 1 {
            return Err(NotebookError::LastNote);
        }
        let index = self.index_of(id)?;
        let mut notes = self.notes.clone();
        notes.remove(index);
        save_json(&self.store, keys::NOTES, &notes)?;

        if self.current == id {
            let neighbour = if index == 0 { 1 } else { index - 1 };
            self.current = self.notes[neighbour].id.clone();
        }
        self.notes = notes;
        info!("Deleted note {}", id);
        Ok(())
    }

    /// Copies a note to the front as "<title> (Copy)" and makes the copy
    /// current.
    pub fn duplicate_note(&mut self, id: &str) -> Result<&Note, NotebookError> {
        let mut copy = self.existing(id)?.clone();
        let now = now_secs();
        copy.id = self.mint_id();
        copy.title = format!("{} (Copy)", copy.title);
        copy.created = now;
        copy.modified = now;
        self.insert_front(vec![copy])
    }

    /// Adds a category; returns `false` if the name was blank or already
    /// listed. Names are stored trimmed and lowercased.
    pub fn add_category(&mut self, name: &str) -> Result<bool, NotebookError> {
        let Some(name) = normalize_category(name) else {
            return Ok(false);
        };
        if self.categories.contains(&name) {
            return Ok(false);
        }
        let mut categories = self.categories.clone();
        categories.push(name);
        save_json(&self.store, keys::NOTE_CATEGORIES, &categories)?;
        self.categories = categories;
        Ok(true)
    }

    /// Notes filed under `category`.
    pub fn notes_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Note> {
        self.notes.iter().filter(move |note| note.category == category)
    }

    /// Notes whose title, content or tags contain `query`, ignoring case. A
    /// blank query matches every note.
    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        match Query::parse(query) {
            Some(query) => self.notes.iter().filter(|note| note.matches(&query)).collect(),
            None => self.notes.iter().collect(),
        }
    }

    /// Selects the following note, wrapping to the first after the last.
    pub fn next_note(&mut self) -> Option<&Note> {
        self.step(1)
    }

    /// Selects the preceding note, wrapping to the last before the first.
    pub fn previous_note(&mut self) -> Option<&Note> {
        self.step(self.notes.len().saturating_sub(1))
    }

    /// Imports notes from a JSON document (see
    /// [`parse_import`](crate::notes::parse_import) for the accepted shapes)
    /// and returns how many were added.
    ///
    /// Imported notes go to the front, the last one in the document first.
    /// The current note does not change.
    pub fn import_notes(&mut self, raw: &str) -> Result<usize, NotebookError> {
        let mut last_id = self.last_id;
        let imported = parse_import(raw, now_secs(), || mint_id(&mut last_id))?;
        let count = imported.len();

        let mut notes: Vec<Note> = imported.into_iter().rev().collect();
        notes.extend(self.notes.iter().cloned());
        save_json(&self.store, keys::NOTES, &notes)?;

        self.notes = notes;
        self.last_id = last_id;
        info!("Imported {} notes", count);
        Ok(count)
    }

    /// Whole-notebook export document.
    pub fn export(&self) -> NotesExport {
        NotesExport::new(self.notes.clone(), self.categories.clone(), now_secs())
    }

    /// Deletes every note and starts over with one empty note.
    pub fn clear_all(&mut self) -> Result<&Note, NotebookError> {
        let note = Note::new(self.mint_id(), now_secs());
        save_json(&self.store, keys::NOTES, &[&note])?;
        self.current = note.id.clone();
        self.notes = vec![note];
        info!("Cleared all notes");
        self.existing(&self.current)
    }

    fn step(&mut self, offset: usize) -> Option<&Note> {
        let len = self.notes.len();
        let index = self.index_of(&self.current).ok()?;
        if len > 1 {
            self.current = self.notes[(index + offset) % len].id.clone();
        }
        self.current()
    }

    /// Applies `change` to a copy of the note and commits it when `change`
    /// reports a modification.
    fn modify<F>(&mut self, id: &str, change: F) -> Result<bool, NotebookError>
    where
        F: FnOnce(&mut Note) -> bool,
    {
        let index = self.index_of(id)?;
        let mut note = self.notes[index].clone();
        if !change(&mut note) {
            return Ok(false);
        }
        let mut notes = self.notes.clone();
        notes[index] = note;
        save_json(&self.store, keys::NOTES, &notes)?;
        self.notes = notes;
        Ok(true)
    }

    fn insert_front(&mut self, added: Vec<Note>) -> Result<&Note, NotebookError> {
        let mut notes = added;
        notes.extend(self.notes.iter().cloned());
        save_json(&self.store, keys::NOTES, &notes)?;
        self.current = notes[0].id.clone();
        self.notes = notes;
        Ok(&self.notes[0])
    }

    fn mint_id(&mut self) -> String {
        mint_id(&mut self.last_id)
    }

    fn index_of(&self, id: &str) -> Result<usize, NotebookError> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| NotebookError::NotFound(id.to_string()))
    }

    fn existing(&self, id: &str) -> Result<&Note, NotebookError> {
        self.get(id).ok_or_else(|| NotebookError::NotFound(id.to_string()))
    }
}

/// Millisecond timestamp id, bumped past `last` so ids stay unique within
/// one millisecond.
fn mint_id(last: &mut u128) -> String {
    *last = now_millis().max(*last + 1);
    last.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::FailingStore;
    use crate::storage::InMemoryStore;

    fn titled(session: &mut NotebookSession<&InMemoryStore>, titles: &[&str]) -> Vec<String> {
        titles
            .iter()
            .map(|title| {
                let id = session.create_note().unwrap().id.clone();
                session.update_note(&id, title, "").unwrap();
                id
            })
            .collect()
    }

    fn titles<S: KeyValueStore>(session: &NotebookSession<S>) -> Vec<&str> {
        session.notes().iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_open_creates_first_note() {
        let store = InMemoryStore::new();
        let session = NotebookSession::open(&store).unwrap();
        assert_eq!(titles(&session), vec!["Untitled Note"]);
        assert_eq!(session.current().map(|n| n.title.as_str()), Some("Untitled Note"));
        assert_eq!(session.categories().len(), 5);
        assert!(store.get(keys::NOTES).unwrap().is_some());
    }

    #[test]
    fn test_notes_survive_reopen() {
        let store = InMemoryStore::new();
        let id = {
            let mut session = NotebookSession::open(&store).unwrap();
            let id = session.create_note().unwrap().id.clone();
            session
                .update_note(&id, "Romans 8", "No condemnation in Christ Jesus")
                .unwrap();
            session.add_tag(&id, "assurance").unwrap();
            session.add_category("Word Study").unwrap();
            id
        };

        let session = NotebookSession::open(&store).unwrap();
        let note = session.get(&id).unwrap();
        assert_eq!(note.word_count, 5);
        assert_eq!(note.tags, vec!["assurance"]);
        assert_eq!(session.current().map(|n| n.id.as_str()), Some(id.as_str()));
        assert_eq!(session.categories().last().map(String::as_str), Some("word study"));
    }

    #[test]
    fn test_delete_refuses_last_note() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let only = session.notes()[0].id.clone();

        assert!(matches!(session.delete_note(&only), Err(NotebookError::LastNote)));
        assert_eq!(session.notes().len(), 1);
    }

    #[test]
    fn test_delete_current_selects_neighbour() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let ids = titled(&mut session, &["a", "b", "c"]);
        // Newest first: c, b, a, Untitled
        session.select(&ids[1]).unwrap();
        session.delete_note(&ids[1]).unwrap();
        assert_eq!(session.current().map(|n| n.title.as_str()), Some("c"));

        session.delete_note(&ids[2]).unwrap();
        assert_eq!(session.current().map(|n| n.title.as_str()), Some("a"));
        assert_eq!(titles(&session), vec!["a", "Untitled Note"]);

        assert!(matches!(session.delete_note("missing"), Err(NotebookError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_goes_to_front() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let ids = titled(&mut session, &["Grace"]);
        session.add_tag(&ids[0], "ephesians").unwrap();

        let copy = session.duplicate_note(&ids[0]).unwrap().clone();
        assert_eq!(copy.title, "Grace (Copy)");
        assert_ne!(copy.id, ids[0]);
        assert_eq!(copy.tags, vec!["ephesians"]);
        assert_eq!(session.notes()[0].id, copy.id);
        assert_eq!(session.current().map(|n| n.id.clone()), Some(copy.id));
    }

    #[test]
    fn test_tags_are_idempotent() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let id = session.notes()[0].id.clone();

        assert!(session.add_tag(&id, "prayer").unwrap());
        assert!(!session.add_tag(&id, "prayer").unwrap());
        assert!(session.remove_tag(&id, "prayer").unwrap());
        assert!(!session.remove_tag(&id, "prayer").unwrap());
        assert!(session.get(&id).unwrap().tags.is_empty());
        assert!(matches!(session.add_tag("missing", "x"), Err(NotebookError::NotFound(_))));
    }

    #[test]
    fn test_set_category() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let id = session.notes()[0].id.clone();

        session.set_category(&id, " Sermon ").unwrap();
        assert_eq!(session.notes_in_category("sermon").count(), 1);
        session.set_category(&id, "").unwrap();
        assert_eq!(session.get(&id).map(|n| n.category.as_str()), Some("bible-study"));
    }

    #[test]
    fn test_add_category_ignores_blank_and_duplicates() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        assert!(!session.add_category("   ").unwrap());
        assert!(!session.add_category("Sermon").unwrap());
        assert!(session.add_category(" Missions ").unwrap());
        assert!(!session.add_category("missions").unwrap());
        assert_eq!(session.categories().len(), 6);
        assert_eq!(
            store.get(keys::NOTE_CATEGORIES).unwrap().as_deref(),
            Some(r#"["bible-study","sermon","prayer","devotional","personal","missions"]"#)
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        titled(&mut session, &["b", "c"]);
        // c (current), b, Untitled
        assert_eq!(
            session.previous_note().map(|n| n.title.as_str()),
            Some("Untitled Note")
        );
        assert_eq!(session.next_note().map(|n| n.title.as_str()), Some("c"));
        assert_eq!(session.next_note().map(|n| n.title.as_str()), Some("b"));
    }

    #[test]
    fn test_import_adds_to_front() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let current = session.current().map(|n| n.id.clone());
        let raw = r#"[
            {"title": "First", "content": "one"},
            {"title": "Second", "content": "two", "category": "prayer"},
            {"title": "Skipped"}
        ]"#;

        assert_eq!(session.import_notes(raw).unwrap(), 2);
        assert_eq!(titles(&session), vec!["Second", "First", "Untitled Note"]);
        assert_eq!(session.notes_in_category("prayer").count(), 1);
        assert_eq!(session.current().map(|n| n.id.clone()), current);

        let ids: Vec<&str> = session.notes().iter().map(|n| n.id.as_str()).collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);

        assert!(matches!(session.import_notes("[]"), Err(NotebookError::NoValidNotes)));
        assert_eq!(session.notes().len(), 3);
    }

    #[test]
    fn test_export_round_trips_through_import() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        titled(&mut session, &["Exodus 3"]);
        let export = serde_json::to_string(&session.export()).unwrap();

        let other = InMemoryStore::new();
        let mut restored = NotebookSession::open(&other).unwrap();
        assert_eq!(restored.import_notes(&export).unwrap(), 2);
        assert_eq!(titles(&restored), vec!["Untitled Note", "Exodus 3", "Untitled Note"]);
    }

    #[test]
    fn test_search_notes() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        let id = session.notes()[0].id.clone();
        session.update_note(&id, "Psalm 23", "The Lord is my shepherd").unwrap();
        titled(&mut session, &["Isaiah 53"]);

        let found: Vec<&str> = session
            .search_notes("SHEPHERD")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(found, vec!["Psalm 23"]);
        assert_eq!(session.search_notes("  ").len(), 2);
    }

    #[test]
    fn test_clear_all_leaves_one_note() {
        let store = InMemoryStore::new();
        let mut session = NotebookSession::open(&store).unwrap();
        titled(&mut session, &["a", "b"]);
        let fresh = session.clear_all().unwrap().id.clone();
        assert_eq!(titles(&session), vec!["Untitled Note"]);
        assert_eq!(session.current().map(|n| n.id.clone()), Some(fresh));
    }

    #[test]
    fn test_store_failure_leaves_notebook_unchanged() {
        let store = FailingStore::failing_on(keys::NOTES);
        save_json(&store.inner, keys::NOTES, &[Note::new("1", 0), Note::new("2", 0)]).unwrap();
        let mut session = NotebookSession::open(&store).unwrap();

        assert!(matches!(session.add_tag("1", "hope"), Err(NotebookError::Store(_))));
        assert!(session.get("1").unwrap().tags.is_empty());
        assert!(matches!(session.delete_note("1"), Err(NotebookError::Store(_))));
        assert_eq!(session.notes().len(), 2);
        assert_eq!(session.current().map(|n| n.id.as_str()), Some("1"));
        assert!(session.create_note().is_err());
        assert_eq!(session.notes().len(), 2);
    }
}
