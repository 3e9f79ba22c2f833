use super::AnnotationSet;
use crate::address::VerseAddress;
use crate::corpus::Corpus;
use serde::{Deserialize, Serialize};

/// Reading statistics for the loaded translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub chapters_read: usize,
    pub total_chapters: usize,
    /// Distinct books with at least one read chapter
    pub books_started: usize,
    /// `round(chapters_read / total_chapters * 100)`, 0 for an empty corpus
    pub percent: u32,
}

impl ReadingProgress {
    pub fn compute(read: &AnnotationSet<VerseAddress>, corpus: &Corpus) -> Self {
        Self::from_counts(read.len(), corpus.total_chapters(), read.distinct_books())
    }

    pub fn from_counts(chapters_read: usize, total_chapters: usize, books_started: usize) -> Self {
        let percent = if total_chapters == 0 {
            0
        } else {
            (chapters_read as f64 / total_chapters as f64 * 100.0).round() as u32
        };
        Self {
            chapters_read,
            total_chapters,
            books_started,
            percent,
        }
    }
}
