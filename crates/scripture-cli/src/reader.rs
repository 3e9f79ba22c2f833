//! Reading and annotation commands.
//!
//! Books are given by name (`Genesis`), abbreviation (`gn`) or 1-based
//! number; chapters and verses are 1-based as printed in a Bible.

use crate::config;
use crate::search::open_reader;
use crate::storage::FileStore;
use anyhow::{anyhow, Result};
use scripture_core::address::VerseAddress;
use scripture_core::annotations::ReadingProgress;
use scripture_core::corpus::Corpus;
use scripture_core::session::ReaderSession;
use scripture_core::storage::KeyValueStore;
use serde::Serialize;
use std::path::PathBuf;

/// Which annotation a toggle command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Bookmark,
    Highlight,
}

/// Outcome of a bookmark or highlight toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub kind: AnnotationKind,
    pub key: String,
    pub label: String,
    /// `true` if the annotation is now set
    pub active: bool,
}

/// A chapter opened for reading.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterView {
    pub translation: String,
    pub label: String,
    pub verses: Vec<String>,
    pub progress: ReadingProgress,
}

/// Reading statistics for the current translation.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub translation: String,
    #[serde(flatten)]
    pub progress: ReadingProgress,
}

/// Toggles a chapter bookmark, or a verse bookmark when `verse` is given.
pub async fn toggle_bookmark(
    book: &str,
    chapter: usize,
    verse: Option<usize>,
    data_dir: Option<&PathBuf>,
) -> Result<ToggleOutcome> {
    let mut session = open(data_dir).await?;
    let (book, chapter) = resolve_chapter(&session, book, chapter)?;

    let (address, active) = match verse {
        Some(verse) => {
            let active = session.toggle_verse_bookmark(book, chapter, verse)?;
            (VerseAddress::verse(book, chapter, verse), active)
        }
        None => {
            let active = session.toggle_chapter_bookmark(book, chapter)?;
            (VerseAddress::chapter(book, chapter), active)
        }
    };

    Ok(outcome(&session, AnnotationKind::Bookmark, address, active))
}

/// Toggles a verse highlight.
pub async fn toggle_highlight(
    book: &str,
    chapter: usize,
    verse: usize,
    data_dir: Option<&PathBuf>,
) -> Result<ToggleOutcome> {
    let mut session = open(data_dir).await?;
    let (book, chapter) = resolve_chapter(&session, book, chapter)?;

    let active = session.toggle_highlight(book, chapter, verse)?;
    let address = VerseAddress::verse(book, chapter, verse);
    Ok(outcome(&session, AnnotationKind::Highlight, address, active))
}

/// Moves to a chapter, marking it read, and returns its text.
pub async fn read_chapter(
    book: &str,
    chapter: usize,
    data_dir: Option<&PathBuf>,
) -> Result<ChapterView> {
    let mut session = open(data_dir).await?;
    let (book, chapter) = resolve_chapter(&session, book, chapter)?;
    session.go_to(book, chapter)?;

    let address = VerseAddress::chapter(book, chapter);
    Ok(ChapterView {
        translation: session.translation().to_string(),
        label: label(&session, &address),
        verses: session.current_chapter().cloned().unwrap_or_default(),
        progress: session.progress(),
    })
}

/// Reports reading progress.
pub async fn show_progress(data_dir: Option<&PathBuf>) -> Result<ProgressView> {
    let session = open(data_dir).await?;
    Ok(ProgressView {
        translation: session.translation().to_string(),
        progress: session.progress(),
    })
}

async fn open(data_dir: Option<&PathBuf>) -> Result<ReaderSession<FileStore>> {
    let data_dir = config::get_data_dir(data_dir)?;
    open_reader(&data_dir, None).await
}

fn outcome<S: KeyValueStore>(
    session: &ReaderSession<S>,
    kind: AnnotationKind,
    address: VerseAddress,
    active: bool,
) -> ToggleOutcome {
    ToggleOutcome {
        kind,
        key: address.key(),
        label: label(session, &address),
        active,
    }
}

fn label<S: KeyValueStore>(session: &ReaderSession<S>, address: &VerseAddress) -> String {
    session
        .corpus()
        .and_then(|corpus| corpus.reference_label(address))
        .unwrap_or_else(|| address.key())
}

fn one_based(value: usize, what: &str) -> Result<usize> {
    value
        .checked_sub(1)
        .ok_or_else(|| anyhow!("{} numbers start at 1", what))
}

/// Resolves a book argument and a 1-based chapter to zero-based indices.
fn resolve_chapter<S: KeyValueStore>(
    session: &ReaderSession<S>,
    book: &str,
    chapter: usize,
) -> Result<(usize, usize)> {
    let corpus = session
        .corpus()
        .ok_or_else(|| anyhow!("No translation loaded"))?;
    Ok((resolve_book(corpus, book)?, one_based(chapter, "chapter")?))
}

/// Finds a book by 1-based number, name or abbreviation (case-insensitive).
pub fn resolve_book(corpus: &Corpus, input: &str) -> Result<usize> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return match number.checked_sub(1) {
            Some(index) if index < corpus.len() => Ok(index),
            _ => Err(anyhow!(
                "Book number {} is out of range (1-{})",
                number,
                corpus.len()
            )),
        };
    }

    corpus
        .book_index(input)
        .or_else(|| {
            corpus.books().iter().position(|book| {
                book.abbrev
                    .as_deref()
                    .is_some_and(|abbrev| abbrev.eq_ignore_ascii_case(input))
            })
        })
        .ok_or_else(|| anyhow!("Unknown book: {:?}", input))
}
