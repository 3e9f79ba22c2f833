//! End-to-end tests for the load → search → annotate workflow.
//!
//! These tests exercise the public API only:
//! 1. Loading: raw translation JSON (both shapes) and lexicon XML
//! 2. Search: verse search in corpus order, ranked lexicon search
//! 3. Sessions: annotations, position and notes written through to the store
//!
//! Run with: `cargo test -p scripture-core --test integration_tests`

use scripture_core::address::{decode, encode_chapter_key, encode_verse_key, VerseAddress};
use scripture_core::annotations::count_distinct_books;
use scripture_core::config::keys;
use scripture_core::corpus::{Corpus, InMemoryCorpusSource};
use scripture_core::error::{CorpusLoadError, NotebookError};
use scripture_core::lexicon::{sort_entries, Language, Lexicon, LexiconFilter, SortMode};
use scripture_core::search::{
    count_occurrences, entry_results, search_lexicon, search_verses, ResultTarget,
};
use scripture_core::session::{DictionarySession, NotebookSession, ReaderSession};
use scripture_core::storage::{InMemoryStore, KeyValueStore};

// ============================================================================
// Fixtures
// ============================================================================

const GENESIS_LIST: &str = r#"[
    {"abbrev": "gn", "name": "Genesis", "chapters": [
        ["In the beginning God created the heaven and the earth.",
         "And the earth was without form, and void..."]
    ]}
]"#;

const MAP_SHAPE: &str = r#"{
    "Genesis": {
        "1": {"1": "In the beginning God created the heaven and the earth.", "2": "And the earth was without form."},
        "2": {"1": "Thus the heavens and the earth were finished."},
        "10": {"1": "Now these are the generations of the sons of Noah."}
    },
    "Exodus": {
        "1": {"1": "Now these are the names.", "2": "", "10": "Tenth verse.", "3": "Third verse."}
    }
}"#;

const HEBREW_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osis>
  <div type="entry" n="2388">
    <w xlit="châzaq" POS="khaw-zak'" lemma="חָזַק" morph="v">חָזַק</w>
    <list><item>to fasten upon</item><item>to be strong</item></list>
  </div>
  <div type="entry" n="430">
    <w xlit="ʼĕlôhîym" POS="el-o-heem'" lemma="אֱלֹהִים" morph="n-m">אֱלֹהִים</w>
    <list><item>gods in the ordinary sense</item><item>God</item></list>
    <foreign><w gloss="G:2316">θεός</w></foreign>
  </div>
  <div type="entry" n="oops">
    <w xlit="broken">x</w>
  </div>
</osis>"#;

const GREEK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osis>
  <div type="entry" n="2316">
    <w xlit="theós" POS="theh'-os" lemma="θεός" morph="n-m">θεός</w>
    <list><item>a deity</item><item>the supreme Divinity; God</item></list>
  </div>
  <div type="entry" n="2478">
    <w xlit="ischyrós" POS="is-khoo-ros'" lemma="ἰσχυρός" morph="adj">ἰσχυρός</w>
    <list><item>forcible</item><item>strong, mighty</item></list>
  </div>
</osis>"#;

// ============================================================================
// Addressing
// ============================================================================

#[test]
fn test_keys_round_trip() {
    for (book, chapter) in [(0, 0), (1, 49), (65, 21)] {
        let key = encode_chapter_key(book, chapter);
        assert_eq!(decode(&key).unwrap(), VerseAddress::chapter(book, chapter));
        for verse in [1, 7, 176] {
            let key = encode_verse_key(book, chapter, verse);
            assert_eq!(
                decode(&key).unwrap(),
                VerseAddress::verse(book, chapter, verse)
            );
        }
    }
    assert!(decode("a-b").is_err());
    assert_eq!(count_distinct_books(["0-0", "0-3", "2-1"]).unwrap(), 2);
}

// ============================================================================
// Corpus + verse search
// ============================================================================

#[test]
fn test_genesis_search_scenario() {
    let corpus = Corpus::from_json_slice(GENESIS_LIST.as_bytes()).unwrap();
    let results = search_verses(&corpus, "beginning");

    assert_eq!(results.len(), 1);
    let hit = &results.matches()[0];
    assert_eq!(hit.address, VerseAddress::verse(0, 0, 1));
    assert_eq!(hit.occurrences, 1);

    assert!(search_verses(&corpus, "").is_empty());
}

#[test]
fn test_map_shape_numeric_order_and_search() {
    let corpus = Corpus::from_json_slice(MAP_SHAPE.as_bytes()).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.books()[0].name, "Genesis");
    assert_eq!(corpus.total_chapters(), 4);

    let genesis = &corpus.books()[0];
    assert!(genesis.chapters[2][0].contains("Noah"));

    // Empty verse dropped, remaining verses in numeric order
    let exodus = &corpus.books()[1].chapters[0];
    assert_eq!(
        exodus,
        &vec![
            "Now these are the names.".to_string(),
            "Third verse.".to_string(),
            "Tenth verse.".to_string(),
        ]
    );

    let keys: Vec<String> = search_verses(&corpus, "NOW")
        .matches()
        .iter()
        .map(|m| m.address.key())
        .collect();
    assert_eq!(keys, vec!["0-2-1", "1-0-1"]);
}

#[test]
fn test_unrecognized_document_is_rejected() {
    let err = Corpus::from_json_slice(br#"{"Genesis": "text"}"#).unwrap_err();
    assert!(matches!(err, CorpusLoadError::UnrecognizedShape(_)));
    let err = Corpus::from_json_slice(b"not json").unwrap_err();
    assert!(matches!(err, CorpusLoadError::Parse(_)));
}

#[test]
fn test_occurrence_counting() {
    assert_eq!(count_occurrences("the the the", "the"), 3);
    assert_eq!(count_occurrences("aaa", "aa"), 1);
    assert_eq!(count_occurrences("text", ""), 0);
}

// ============================================================================
// Lexicon
// ============================================================================

#[test]
fn test_lexicon_load_and_rank() {
    let lexicon = Lexicon::from_sources(HEBREW_XML, GREEK_XML).unwrap();
    let ids: Vec<&str> = lexicon.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["H430", "G2316", "H2388", "G2478"]);

    let elohim = lexicon.get("h430").unwrap();
    assert!(elohim.cross_references.contains("G2316"));

    let matches = search_lexicon(lexicon.entries(), "strong");
    let ranked: Vec<&str> = matches.iter().map(|m| m.entry.id.as_str()).collect();
    assert_eq!(ranked, vec!["H2388", "G2478"]);

    let matches = search_lexicon(lexicon.entries(), "theós");
    assert_eq!(matches[0].entry.id, "G2316");
    let results = entry_results(&matches, 5);
    assert_eq!(results[0].target, ResultTarget::Entry("G2316".to_string()));
}

#[test]
fn test_lexicon_browse() {
    let lexicon = Lexicon::from_sources(HEBREW_XML, GREEK_XML).unwrap();
    let mut greek = lexicon.filtered(&LexiconFilter::language(Language::Greek));
    sort_entries(&mut greek, SortMode::NameAsc);
    let names: Vec<&str> = greek.iter().map(|e| e.transliteration.as_str()).collect();
    assert_eq!(names, vec!["ischyrós", "theós"]);
    assert_eq!(lexicon.available_letters(), vec!['C', 'I', 'T']);
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_reader_session_round_trip() {
    let source = InMemoryCorpusSource::new()
        .with("kjv", GENESIS_LIST)
        .with("asv", MAP_SHAPE);
    let store = InMemoryStore::new();

    {
        let mut session = ReaderSession::open(&store).unwrap();
        session.load(&source).await.unwrap();
        session.toggle_highlight(0, 0, 1).unwrap();
        session.switch_translation(&source, "asv").await.unwrap();
        session.go_to(1, 0).unwrap();
    }

    assert_eq!(store.get(keys::TRANSLATION).unwrap().as_deref(), Some("asv"));

    let mut session = ReaderSession::open(&store).unwrap();
    session.load(&source).await.unwrap();
    assert_eq!(session.position().book_index, 1);
    assert!(session.highlights().has(&VerseAddress::verse(0, 0, 1)));

    let progress = session.progress();
    assert_eq!(progress.chapters_read, 2);
    assert_eq!(progress.total_chapters, 4);
    assert_eq!(progress.books_started, 2);
    assert_eq!(progress.percent, 50);
}

#[test]
fn test_dictionary_session_round_trip() {
    let store = InMemoryStore::new();
    {
        let lexicon = Lexicon::from_sources(HEBREW_XML, GREEK_XML).unwrap();
        let mut session = DictionarySession::open(&store, lexicon).unwrap();
        assert_eq!(session.search("god").len(), 2);
        session.toggle_favorite("G2316").unwrap();
    }

    let lexicon = Lexicon::from_sources(HEBREW_XML, GREEK_XML).unwrap();
    let session = DictionarySession::open(&store, lexicon).unwrap();
    assert!(session.favorites().has(&"G2316".to_string()));
    assert_eq!(session.recent().items()[0].term, "god");
}

#[test]
fn test_notebook_session_round_trip() {
    let store = InMemoryStore::new();
    {
        let mut notebook = NotebookSession::open(&store).unwrap();
        let first = notebook.notes()[0].id.clone();
        assert!(matches!(notebook.delete_note(&first), Err(NotebookError::LastNote)));

        let raw = r#"{"notes": [{"title": "John 1", "content": "In the beginning was the Word"}]}"#;
        assert_eq!(notebook.import_notes(raw).unwrap(), 1);
        notebook.delete_note(&first).unwrap();
    }

    let notebook = NotebookSession::open(&store).unwrap();
    let note = &notebook.notes()[0];
    assert_eq!(notebook.notes().len(), 1);
    assert_eq!(note.title, "John 1");
    assert_eq!(note.word_count, 6);
    assert!(store.get(keys::NOTES).unwrap().is_some());
}
