use super::{restore, restore_addresses};
use crate::address::VerseAddress;
use crate::annotations::{AnnotationSet, ReadingProgress};
use crate::config::{keys, translation_name, DEFAULT_TRANSLATION};
use crate::corpus::{Chapter, Corpus, CorpusSource};
use crate::error::SessionError;
use crate::search::{search_verses, VerseSearchResults};
use crate::storage::{save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Current book and chapter, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPosition {
    pub book_index: usize,
    pub chapter_index: usize,
}

impl ReadingPosition {
    pub fn chapter_address(&self) -> VerseAddress {
        VerseAddress::chapter(self.book_index, self.chapter_index)
    }
}

/// State of one reader: the loaded translation, the reading position and
/// the annotation sets.
///
/// # Example
///
/// ```
/// use scripture_core::corpus::InMemoryCorpusSource;
/// use scripture_core::session::ReaderSession;
/// use scripture_core::storage::InMemoryStore;
///
/// # async fn example() -> Result<(), scripture_core::error::SessionError> {
/// let source = InMemoryCorpusSource::new().with(
///     "kjv",
///     r#"[{"name":"Genesis","chapters":[["In the beginning"],["Second"]]}]"#,
/// );
/// let mut session = ReaderSession::open(InMemoryStore::new())?;
/// session.load(&source).await?;
/// session.go_to(0, 1)?;
/// assert_eq!(session.progress().chapters_read, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReaderSession<S: KeyValueStore> {
    store: S,
    translation: String,
    corpus: Option<Corpus>,
    position: ReadingPosition,
    chapter_bookmarks: AnnotationSet<VerseAddress>,
    verse_bookmarks: AnnotationSet<VerseAddress>,
    highlights: AnnotationSet<VerseAddress>,
    read_chapters: AnnotationSet<VerseAddress>,
}

impl<S: KeyValueStore> ReaderSession<S> {
    /// Restores persisted state from `store`. No corpus is loaded yet.
    pub fn open(store: S) -> Result<Self, SessionError> {
        let translation = match store.get(keys::TRANSLATION)? {
            Some(id) if translation_name(&id).is_some() => id,
            Some(id) => {
                warn!(
                    "Stored translation {:?} is unknown, using {}",
                    id, DEFAULT_TRANSLATION
                );
                DEFAULT_TRANSLATION.to_string()
            }
            None => DEFAULT_TRANSLATION.to_string(),
        };

        Ok(Self {
            position: restore(&store, keys::POSITION)?,
            chapter_bookmarks: restore_addresses(&store, keys::CHAPTER_BOOKMARKS)?,
            verse_bookmarks: restore_addresses(&store, keys::VERSE_BOOKMARKS)?,
            highlights: restore_addresses(&store, keys::HIGHLIGHTS)?,
            read_chapters: restore_addresses(&store, keys::READ_CHAPTERS)?,
            translation,
            corpus: None,
            store,
        })
    }

    /// Fetches and loads the current translation, then marks the current
    /// chapter read.
    ///
    /// A stored position outside the loaded corpus is reset to the first
    /// chapter.
    pub async fn load<C: CorpusSource + ?Sized>(&mut self, source: &C) -> Result<(), SessionError> {
        let translation = self.translation.clone();
        let corpus = fetch_corpus(source, &translation).await?;
        self.install(&translation, corpus)
    }

    /// Replaces the loaded translation.
    ///
    /// All-or-nothing: if the id is unknown, the fetch or parse fails, or a
    /// store write fails, the previous translation, corpus and position stay
    /// in place.
    #[instrument(skip(self, source))]
    pub async fn switch_translation<C: CorpusSource + ?Sized>(
        &mut self,
        source: &C,
        translation: &str,
    ) -> Result<(), SessionError> {
        if translation_name(translation).is_none() {
            return Err(SessionError::UnknownTranslation(translation.to_string()));
        }
        if translation == self.translation && self.corpus.is_some() {
            return Ok(());
        }

        let corpus = fetch_corpus(source, translation).await?;
        self.install(translation, corpus)?;
        info!("Switched to {}", self.translation);
        Ok(())
    }

    /// Writes the state implied by `corpus` to the store, then adopts it.
    ///
    /// Nothing on `self` changes until every write has succeeded. The
    /// translation key is written last.
    fn install(&mut self, translation: &str, corpus: Corpus) -> Result<(), SessionError> {
        let mut position = self.position;
        if corpus
            .chapter(position.book_index, position.chapter_index)
            .is_none()
        {
            warn!(
                "Position {}-{} is outside {}, starting at the beginning",
                position.book_index, position.chapter_index, translation
            );
            position = ReadingPosition::default();
        }

        let mut read_chapters = self.read_chapters.clone();
        let newly_read = read_chapters.add(position.chapter_address());

        if position != self.position {
            save_json(&self.store, keys::POSITION, &position)?;
        }
        if newly_read {
            save_json(&self.store, keys::READ_CHAPTERS, &read_chapters)?;
        }
        if translation != self.translation {
            self.store.set(keys::TRANSLATION, translation)?;
        }

        self.translation = translation.to_string();
        self.position = position;
        self.read_chapters = read_chapters;
        self.corpus = Some(corpus);
        Ok(())
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    pub fn position(&self) -> ReadingPosition {
        self.position
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verses of the current chapter.
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.corpus
            .as_ref()?
            .chapter(self.position.book_index, self.position.chapter_index)
    }

    /// Moves to a chapter, persists the position and marks the chapter read.
    pub fn go_to(&mut self, book: usize, chapter: usize) -> Result<(), SessionError> {
        self.require_chapter(book, chapter)?;
        self.position = ReadingPosition {
            book_index: book,
            chapter_index: chapter,
        };
        self.persist_position()?;
        self.mark_current_read()
    }

    /// Moves to the following chapter, crossing into the next book at the end
    /// of a book. Returns `false` at the end of the corpus.
    pub fn next_chapter(&mut self) -> Result<bool, SessionError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        let ReadingPosition {
            book_index,
            chapter_index,
        } = self.position;
        let target = if corpus.chapter(book_index, chapter_index + 1).is_some() {
            Some((book_index, chapter_index + 1))
        } else if corpus.chapter(book_index + 1, 0).is_some() {
            Some((book_index + 1, 0))
        } else {
            None
        };
        match target {
            Some((book, chapter)) => self.go_to(book, chapter).map(|_| true),
            None => Ok(false),
        }
    }

    /// Moves to the preceding chapter, crossing into the last chapter of the
    /// previous book. Returns `false` at the start of the corpus.
    pub fn previous_chapter(&mut self) -> Result<bool, SessionError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        let ReadingPosition {
            book_index,
            chapter_index,
        } = self.position;
        let target = if chapter_index > 0 {
            Some((book_index, chapter_index - 1))
        } else if book_index > 0 {
            corpus
                .book(book_index - 1)
                .and_then(|book| book.chapters.len().checked_sub(1))
                .map(|last| (book_index - 1, last))
        } else {
            None
        };
        match target {
            Some((book, chapter)) => self.go_to(book, chapter).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn chapter_bookmarks(&self) -> &AnnotationSet<VerseAddress> {
        &self.chapter_bookmarks
    }

    pub fn verse_bookmarks(&self) -> &AnnotationSet<VerseAddress> {
        &self.verse_bookmarks
    }

    pub fn highlights(&self) -> &AnnotationSet<VerseAddress> {
        &self.highlights
    }

    pub fn read_chapters(&self) -> &AnnotationSet<VerseAddress> {
        &self.read_chapters
    }

    /// Toggles a chapter bookmark; returns `true` if now bookmarked.
    pub fn toggle_chapter_bookmark(
        &mut self,
        book: usize,
        chapter: usize,
    ) -> Result<bool, SessionError> {
        self.require_chapter(book, chapter)?;
        let now = self
            .chapter_bookmarks
            .toggle(VerseAddress::chapter(book, chapter));
        save_json(&self.store, keys::CHAPTER_BOOKMARKS, &self.chapter_bookmarks)?;
        Ok(now)
    }

    /// Toggles a verse bookmark (1-based verse); returns `true` if now
    /// bookmarked.
    pub fn toggle_verse_bookmark(
        &mut self,
        book: usize,
        chapter: usize,
        verse: usize,
    ) -> Result<bool, SessionError> {
        let address = self.require_verse(book, chapter, verse)?;
        let now = self.verse_bookmarks.toggle(address);
        save_json(&self.store, keys::VERSE_BOOKMARKS, &self.verse_bookmarks)?;
        Ok(now)
    }

    /// Toggles a verse highlight (1-based verse); returns `true` if now
    /// highlighted.
    pub fn toggle_highlight(
        &mut self,
        book: usize,
        chapter: usize,
        verse: usize,
    ) -> Result<bool, SessionError> {
        let address = self.require_verse(book, chapter, verse)?;
        let now = self.highlights.toggle(address);
        save_json(&self.store, keys::HIGHLIGHTS, &self.highlights)?;
        Ok(now)
    }

    /// Forgets every read chapter.
    pub fn clear_progress(&mut self) -> Result<(), SessionError> {
        self.read_chapters.clear();
        save_json(&self.store, keys::READ_CHAPTERS, &self.read_chapters)?;
        Ok(())
    }

    /// Reading statistics against the loaded corpus (zero totals before a
    /// corpus is loaded).
    pub fn progress(&self) -> ReadingProgress {
        match &self.corpus {
            Some(corpus) => ReadingProgress::compute(&self.read_chapters, corpus),
            None => ReadingProgress::from_counts(
                self.read_chapters.len(),
                0,
                self.read_chapters.distinct_books(),
            ),
        }
    }

    /// Searches the loaded translation.
    pub fn search(&self, query: &str) -> Result<VerseSearchResults, SessionError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        Ok(search_verses(corpus, query))
    }

    fn require_chapter(&self, book: usize, chapter: usize) -> Result<(), SessionError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        match corpus.chapter(book, chapter) {
            Some(_) => Ok(()),
            None => Err(SessionError::OutOfRange { book, chapter }),
        }
    }

    fn require_verse(
        &self,
        book: usize,
        chapter: usize,
        verse: usize,
    ) -> Result<VerseAddress, SessionError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        let address = VerseAddress::verse(book, chapter, verse);
        if corpus.contains(&address) {
            Ok(address)
        } else {
            Err(SessionError::OutOfRange { book, chapter })
        }
    }

    fn mark_current_read(&mut self) -> Result<(), SessionError> {
        if self.read_chapters.add(self.position.chapter_address()) {
            save_json(&self.store, keys::READ_CHAPTERS, &self.read_chapters)?;
        }
        Ok(())
    }

    fn persist_position(&self) -> Result<(), SessionError> {
        save_json(&self.store, keys::POSITION, &self.position)?;
        Ok(())
    }
}

async fn fetch_corpus<C: CorpusSource + ?Sized>(
    source: &C,
    translation: &str,
) -> Result<Corpus, SessionError> {
    let bytes = source.fetch(translation).await?;
    Ok(Corpus::from_json_slice(&bytes)?)
}
