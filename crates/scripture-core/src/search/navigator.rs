//! Stepping through individual search hits.
//!
//! A verse with three occurrences of the query contributes three stops. The
//! cursor wraps in both directions.

use crate::address::VerseAddress;
use serde::{Deserialize, Serialize};

/// One occurrence of the query: a verse and the hit's index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrencePosition {
    pub address: VerseAddress,
    /// 0-based index of the hit inside the verse text
    pub occurrence: usize,
}

/// Cursor over occurrence positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchNavigator {
    positions: Vec<OccurrencePosition>,
    current: Option<usize>,
}

impl MatchNavigator {
    pub fn new(positions: Vec<OccurrencePosition>) -> Self {
        Self {
            positions,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the current stop, if navigation has started.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&OccurrencePosition> {
        self.positions.get(self.current?)
    }

    /// Advances to the next stop, wrapping from the last to the first.
    ///
    /// Starts at the first stop when navigation has not begun.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&OccurrencePosition> {
        if self.positions.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(index) => (index + 1) % self.positions.len(),
            None => 0,
        };
        self.current = Some(next);
        self.positions.get(next)
    }

    /// Steps back, wrapping from the first stop to the last.
    ///
    /// Starts at the last stop when navigation has not begun.
    pub fn previous(&mut self) -> Option<&OccurrencePosition> {
        let len = self.positions.len();
        if len == 0 {
            return None;
        }
        let previous = match self.current {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        self.current = Some(previous);
        self.positions.get(previous)
    }

    /// Moves to the first stop inside a chapter, leaving the cursor alone if
    /// the chapter has none.
    pub fn first_in_chapter(&mut self, book: usize, chapter: usize) -> Option<&OccurrencePosition> {
        let index = self
            .positions
            .iter()
            .position(|p| p.address.book == book && p.address.chapter == chapter)?;
        self.current = Some(index);
        self.positions.get(index)
    }
}
