//! Benchmarks for verse and lexicon search.
//!
//! Run with: `cargo bench -p scripture-core --bench search`
//!
//! These benchmarks measure:
//! - Verse search over corpora of increasing size
//! - Verse search with rare, common and absent queries
//! - Lexicon search with relevance ranking
//! - Occurrence counting on a single long text
//!
//! Corpus sizes bracket a real translation (66 books, 1,189 chapters,
//! ~31,000 verses).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scripture_core::corpus::{Book, Corpus};
use scripture_core::lexicon::{Language, Lexicon, LexiconEntry};
use scripture_core::search::{count_occurrences, search_lexicon, search_verses};
use std::collections::BTreeSet;

// =============================================================================
// Test Data Generation
// =============================================================================

const PHRASES: [&str; 8] = [
    "In the beginning God created the heaven and the earth",
    "And the earth was without form, and void",
    "and darkness was upon the face of the deep",
    "And God said, Let there be light: and there was light",
    "The LORD is my shepherd; I shall not want",
    "He maketh me to lie down in green pastures",
    "For God so loved the world, that he gave his only begotten Son",
    "Blessed are the meek: for they shall inherit the earth",
];

/// Builds a corpus of `books` books, 25 chapters each, 30 verses per chapter.
fn sample_corpus(books: usize) -> Corpus {
    let books = (0..books)
        .map(|b| {
            let chapters = (0..25)
                .map(|c| {
                    (0..30)
                        .map(|v| {
                            let phrase = PHRASES[(b + c + v) % PHRASES.len()];
                            format!("{} ({}:{}:{})", phrase, b, c, v)
                        })
                        .collect()
                })
                .collect();
            Book::new(format!("Book {}", b), chapters)
        })
        .collect();
    Corpus::new(books)
}

fn sample_lexicon(size: u32) -> Lexicon {
    let entries = (1..=size)
        .map(|n| {
            let language = if n % 2 == 0 {
                Language::Greek
            } else {
                Language::Hebrew
            };
            LexiconEntry {
                id: LexiconEntry::make_id(language, n),
                number: n,
                original: format!("word{}", n),
                transliteration: format!("translit{}", n % 97),
                pronunciation: format!("pron-{}", n % 13),
                lemma: format!("lemma{}", n),
                morphology: "n-m".to_string(),
                gloss: String::new(),
                definition: vec![
                    PHRASES[n as usize % PHRASES.len()].to_string(),
                    PHRASES[(n as usize + 3) % PHRASES.len()].to_string(),
                ],
                language,
                cross_references: BTreeSet::new(),
            }
        })
        .collect();
    Lexicon::from_entries(entries)
}

// =============================================================================
// Verse Search
// =============================================================================

fn bench_verse_search_varying_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("verse_search_size");
    group.sample_size(50);

    for books in [6, 33, 66] {
        let corpus = sample_corpus(books);
        let verses = books * 25 * 30;

        group.throughput(Throughput::Elements(verses as u64));
        group.bench_with_input(BenchmarkId::from_parameter(verses), &corpus, |b, corpus| {
            b.iter(|| search_verses(corpus, black_box("shepherd")));
        });
    }
    group.finish();
}

fn bench_verse_search_varying_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("verse_search_query");
    group.sample_size(50);
    let corpus = sample_corpus(66);

    let queries = [
        ("rare", "begotten"),
        ("common", "the"),
        ("absent", "zerubbabel"),
    ];
    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| search_verses(&corpus, black_box(query)));
        });
    }
    group.finish();
}

// =============================================================================
// Lexicon Search
// =============================================================================

fn bench_lexicon_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexicon_search");
    group.sample_size(100);

    // Strong's has 8,674 Hebrew and 5,624 Greek entries
    for size in [1_000u32, 14_298] {
        let lexicon = sample_lexicon(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lexicon, |b, lexicon| {
            b.iter(|| search_lexicon(lexicon.entries(), black_box("earth")));
        });
    }
    group.finish();
}

fn bench_count_occurrences(c: &mut Criterion) {
    let text = PHRASES.join(" ").repeat(50);
    c.bench_function("count_occurrences", |b| {
        b.iter(|| count_occurrences(black_box(&text), black_box("the")));
    });
}

criterion_group!(
    benches,
    bench_verse_search_varying_size,
    bench_verse_search_varying_query,
    bench_lexicon_search,
    bench_count_occurrences,
);
criterion_main!(benches);
