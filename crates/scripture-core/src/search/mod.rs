//! In-memory search over verses and lexicon entries.
//!
//! Both searches share one pipeline:
//!
//! 1. **Normalize** the query: trim, case-fold. A blank query short-circuits
//!    to an empty result without touching the data.
//! 2. **Match**: keep every item whose designated fields contain the query as
//!    a case-insensitive substring, counting non-overlapping occurrences.
//! 3. **Order**: verses stay in corpus order; lexicon entries are scored and
//!    stable-sorted by descending relevance.
//!
//! # Architecture
//!
//! - `types`: [`Query`], match records and display [`SearchResult`]s
//! - `matcher`: substring containment and occurrence counting
//! - `verse`: verse search and its [`VerseSearchResults`]
//! - `ranking`: the additive relevance score for lexicon entries
//! - `lexicon`: lexicon search and display conversion
//! - `navigator`: wrap-around cursor over individual hits
//!
//! # Usage
//!
//! ```
//! use scripture_core::corpus::{Book, Corpus};
//! use scripture_core::search::search_verses;
//!
//! let corpus = Corpus::new(vec![Book::new(
//!     "Genesis",
//!     vec![vec!["Let there be light: and there was light.".to_string()]],
//! )]);
//!
//! let results = search_verses(&corpus, "Light");
//! assert_eq!(results.total_occurrences(), 2);
//!
//! let mut navigator = results.navigator();
//! assert_eq!(navigator.next().map(|hit| hit.occurrence), Some(0));
//! assert_eq!(navigator.next().map(|hit| hit.occurrence), Some(1));
//! assert_eq!(navigator.next().map(|hit| hit.occurrence), Some(0));
//! ```

pub mod types;

mod lexicon;
mod matcher;
mod navigator;
mod ranking;
mod verse;

pub use lexicon::{entry_results, search_lexicon};
pub use matcher::{contains_query, count_occurrences, count_query, equals_query};
pub use navigator::{MatchNavigator, OccurrencePosition};
pub use ranking::{rank, relevance_score};
pub use types::{EntryMatch, Query, ResultTarget, SearchResult, VerseMatch};
pub use verse::{search_verses, VerseSearchResults};
