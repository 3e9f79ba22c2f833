//! Pull parser for Strong's dictionary XML.
//!
//! Entries look like this:
//!
//! ```xml
//! <div type="entry" n="430">
//!   <w xlit="ʼĕlôhîym" POS="el-o-heem'" lemma="אֱלֹהִים" morph="n-m">אֱלֹהִים</w>
//!   <list>
//!     <item>gods in the ordinary sense</item>
//!     <item>God</item>
//!   </list>
//!   <foreign><w gloss="G:2316">θεός</w></foreign>
//! </div>
//! ```
//!
//! The first `<w>` outside `<foreign>` is the headword. Items of the first
//! `<list>` are the definition lines. On Hebrew entries, `<w gloss="G:n">`
//! inside `<foreign>` are cross references to Greek entries.
//!
//! An entry without a headword or without a numeric `n` is dropped and
//! logged; the rest of the document still loads.

use super::{Language, LexiconEntry};
use crate::error::LexiconError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

const CROSS_REFERENCE_PREFIX: &str = "G:";

/// Parses one dictionary document into entries of `language`.
///
/// Fails only when the document is not well-formed XML.
#[instrument(skip_all, fields(language = %language, len = xml.len()))]
pub fn parse_strongs_xml(xml: &str, language: Language) -> Result<Vec<LexiconEntry>, LexiconError> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    let mut dropped = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| LexiconError::Xml {
            position: reader.error_position(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => match current.as_mut() {
                Some(builder) => builder.open(e),
                None if is_entry_div(e) => current = Some(EntryBuilder::new(e)),
                None => {}
            },
            Event::Empty(ref e) => match current.as_mut() {
                Some(builder) => builder.empty(e),
                // A self-closing entry div has no headword
                None if is_entry_div(e) => dropped += 1,
                None => {}
            },
            Event::End(_) => {
                if let Some(builder) = current.as_mut() {
                    if builder.close() {
                        if let Some(builder) = current.take() {
                            match builder.finish(language) {
                                Ok(entry) => entries.push(entry),
                                Err(reason) => {
                                    warn!("Skipping malformed {} entry: {}", language, reason);
                                    dropped += 1;
                                }
                            }
                        }
                    }
                }
            }
            Event::Text(ref t) => {
                if let Some(builder) = current.as_mut() {
                    match t.unescape() {
                        Ok(text) => builder.text(&text),
                        Err(e) => builder.fail(format!("bad text: {}", e)),
                    }
                }
            }
            Event::CData(ref c) => {
                if let Some(builder) = current.as_mut() {
                    builder.text(&String::from_utf8_lossy(c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        debug!("Document ended inside an unterminated entry");
        dropped += 1;
    }
    if dropped > 0 {
        warn!("Dropped {} malformed {} entries", dropped, language);
    }

    Ok(entries)
}

fn is_entry_div(e: &BytesStart) -> bool {
    e.local_name().as_ref() == b"div" && attribute(e, b"type").as_deref() == Some("entry")
}

fn attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// Headword attributes plus accumulated text.
#[derive(Debug, Default)]
struct Headword {
    text: String,
    transliteration: String,
    pronunciation: String,
    lemma: String,
    morphology: String,
    gloss: String,
}

impl Headword {
    fn from_element(e: &BytesStart) -> Self {
        Self {
            text: String::new(),
            transliteration: attribute(e, b"xlit").unwrap_or_default(),
            pronunciation: attribute(e, b"POS").unwrap_or_default(),
            lemma: attribute(e, b"lemma").unwrap_or_default(),
            morphology: attribute(e, b"morph").unwrap_or_default(),
            gloss: attribute(e, b"gloss").unwrap_or_default(),
        }
    }
}

/// Accumulates one `<div type="entry">` while its events stream past.
///
/// `stack` holds the local names of open elements nested inside the entry
/// div; the div itself is not on it.
struct EntryBuilder {
    n: Option<String>,
    stack: Vec<Vec<u8>>,
    headword: Option<Headword>,
    /// Stack depth at which the headword `<w>` was opened, while it is open
    headword_open: Option<usize>,
    list_open: Option<usize>,
    list_done: bool,
    item: Option<(usize, String)>,
    definition: Vec<String>,
    cross_references: BTreeSet<String>,
    error: Option<String>,
}

impl EntryBuilder {
    fn new(div: &BytesStart) -> Self {
        Self {
            n: attribute(div, b"n"),
            stack: Vec::new(),
            headword: None,
            headword_open: None,
            list_open: None,
            list_done: false,
            item: None,
            definition: Vec::new(),
            cross_references: BTreeSet::new(),
            error: None,
        }
    }

    fn in_foreign(&self) -> bool {
        self.stack.iter().any(|name| name.as_slice() == b"foreign")
    }

    fn open(&mut self, e: &BytesStart) {
        let name = e.local_name().as_ref().to_vec();
        self.element(e, &name);
        let depth = self.stack.len() + 1;

        match name.as_slice() {
            b"w" if self.headword.is_none() && !self.in_foreign() => {
                self.headword = Some(Headword::from_element(e));
                self.headword_open = Some(depth);
            }
            b"list" if self.list_open.is_none() && !self.list_done => {
                self.list_open = Some(depth);
            }
            b"item" if self.list_open.is_some() && self.item.is_none() => {
                self.item = Some((depth, String::new()));
            }
            _ => {}
        }
        self.stack.push(name);
    }

    fn empty(&mut self, e: &BytesStart) {
        let name = e.local_name().as_ref().to_vec();
        self.element(e, &name);
        if name == b"w" && self.headword.is_none() && !self.in_foreign() {
            self.headword = Some(Headword::from_element(e));
        }
    }

    /// Handling shared by start and empty elements.
    fn element(&mut self, e: &BytesStart, name: &[u8]) {
        if name == b"w" && self.in_foreign() {
            if let Some(gloss) = attribute(e, b"gloss") {
                if let Some(number) = gloss.strip_prefix(CROSS_REFERENCE_PREFIX) {
                    let number = number.trim();
                    if !number.is_empty() {
                        self.cross_references.insert(format!(
                            "{}{}",
                            Language::Greek.prefix(),
                            number
                        ));
                    }
                }
            }
        }
    }

    /// Handles an end tag. Returns `true` when it closes the entry itself.
    fn close(&mut self) -> bool {
        let depth = self.stack.len();
        if depth == 0 {
            return true;
        }

        if self.headword_open == Some(depth) {
            self.headword_open = None;
        }
        if matches!(self.item, Some((open, _)) if open == depth) {
            if let Some((_, text)) = self.item.take() {
                self.definition.push(text.trim().to_string());
            }
        }
        if self.list_open == Some(depth) {
            self.list_open = None;
            self.list_done = true;
        }

        self.stack.pop();
        false
    }

    fn text(&mut self, text: &str) {
        if self.headword_open.is_some() {
            if let Some(headword) = self.headword.as_mut() {
                headword.text.push_str(text);
            }
        }
        if let Some((_, item)) = self.item.as_mut() {
            item.push_str(text);
        }
    }

    fn fail(&mut self, reason: String) {
        self.error.get_or_insert(reason);
    }

    fn finish(self, language: Language) -> Result<LexiconEntry, String> {
        if let Some(reason) = self.error {
            return Err(reason);
        }

        let raw_number = self.n.ok_or_else(|| "missing n attribute".to_string())?;
        let number: u32 = raw_number
            .trim()
            .parse()
            .map_err(|_| format!("n={:?} is not a number", raw_number))?;
        let id = LexiconEntry::make_id(language, number);

        let headword = self
            .headword
            .ok_or_else(|| format!("{} has no <w> headword", id))?;

        let cross_references = match language {
            Language::Hebrew => self.cross_references,
            Language::Greek => BTreeSet::new(),
        };

        Ok(LexiconEntry {
            id,
            number,
            original: headword.text.trim().to_string(),
            transliteration: headword.transliteration,
            pronunciation: headword.pronunciation,
            lemma: headword.lemma,
            morphology: headword.morphology,
            gloss: headword.gloss,
            definition: self.definition,
            language,
            cross_references,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEBREW: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osis>
  <div type="glossary">
    <div type="entry" n="1">
      <w xlit="ʼâb" POS="awb" lemma="אָב" morph="n-m">אָב</w>
      <list>
        <item>father of an individual</item>
        <item>of God as father of his people</item>
      </list>
      <foreign><w gloss="G:3962">πατήρ</w></foreign>
    </div>
    <div type="entry" n="430">
      <w xlit="ʼĕlôhîym" POS="el-o-heem'" lemma="אֱלֹהִים" morph="n-m-p">אֱלֹהִים</w>
      <list><item>gods &amp; rulers</item><item>God</item></list>
    </div>
  </div>
</osis>"#;

    #[test]
    fn test_parse_hebrew_entries() {
        let entries = parse_strongs_xml(HEBREW, Language::Hebrew).unwrap();
        assert_eq!(entries.len(), 2);

        let ab = &entries[0];
        assert_eq!(ab.id, "H1");
        assert_eq!(ab.number, 1);
        assert_eq!(ab.original, "אָב");
        assert_eq!(ab.transliteration, "ʼâb");
        assert_eq!(ab.pronunciation, "awb");
        assert_eq!(ab.lemma, "אָב");
        assert_eq!(ab.morphology, "n-m");
        assert_eq!(
            ab.definition,
            vec!["father of an individual", "of God as father of his people"]
        );
        assert_eq!(ab.language, Language::Hebrew);
        assert!(ab.cross_references.contains("G3962"));
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let entries = parse_strongs_xml(HEBREW, Language::Hebrew).unwrap();
        assert_eq!(entries[1].definition[0], "gods & rulers");
    }

    #[test]
    fn test_greek_entries_have_no_cross_references() {
        let xml = r#"<div type="entry" n="3056">
            <w xlit="lógos" POS="log'-os">λόγος</w>
            <foreign><w gloss="G:1">x</w></foreign>
        </div>"#;
        let entries = parse_strongs_xml(xml, Language::Greek).unwrap();
        assert_eq!(entries[0].id, "G3056");
        assert!(entries[0].cross_references.is_empty());
    }

    #[test]
    fn test_entry_without_headword_is_skipped() {
        let xml = r#"<root>
            <div type="entry" n="1"><list><item>orphan</item></list></div>
            <div type="entry" n="2"><w xlit="b">ב</w></div>
            <div type="entry" n="3"/>
        </root>"#;
        let entries = parse_strongs_xml(xml, Language::Hebrew).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "H2");
    }

    #[test]
    fn test_entry_with_bad_number_is_skipped() {
        let xml = r#"<root>
            <div type="entry" n="abc"><w xlit="a">א</w></div>
            <div type="entry"><w xlit="a">א</w></div>
            <div type="entry" n="5"><w xlit="e">ה</w></div>
        </root>"#;
        let entries = parse_strongs_xml(xml, Language::Hebrew).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["H5"]);
    }

    #[test]
    fn test_self_closing_headword() {
        let xml = r#"<div type="entry" n="7"><w xlit="z" POS="zee"/></div>"#;
        let entries = parse_strongs_xml(xml, Language::Greek).unwrap();
        assert_eq!(entries[0].original, "");
        assert_eq!(entries[0].transliteration, "z");
    }

    #[test]
    fn test_only_first_list_is_definition() {
        let xml = r#"<div type="entry" n="9">
            <w xlit="t">ט</w>
            <list><item>first</item></list>
            <list><item>second</item></list>
        </div>"#;
        let entries = parse_strongs_xml(xml, Language::Hebrew).unwrap();
        assert_eq!(entries[0].definition, vec!["first"]);
    }

    #[test]
    fn test_item_text_includes_nested_markup() {
        let xml = r#"<div type="entry" n="10">
            <w xlit="y">י</w>
            <list><item>hand, <hi>figuratively</hi> power</item></list>
        </div>"#;
        let entries = parse_strongs_xml(xml, Language::Hebrew).unwrap();
        assert_eq!(entries[0].definition, vec!["hand, figuratively power"]);
    }

    #[test]
    fn test_non_entry_divs_are_ignored() {
        let xml = r#"<div type="glossary"><div type="intro"><w xlit="x">x</w></div></div>"#;
        assert!(parse_strongs_xml(xml, Language::Greek).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_fails() {
        let xml = r#"<div type="entry" n="1"><w xlit="a">א</list></div>"#;
        assert!(matches!(
            parse_strongs_xml(xml, Language::Hebrew),
            Err(LexiconError::Xml { .. })
        ));
    }
}
