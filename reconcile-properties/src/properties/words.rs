//! Token-level properties: the words of a mention and its head.

use reconcile::Annotation;
use reconcile_document::{names, Document};

use crate::{Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

/// Tags that end the pre-modifier part of a noun phrase.
const BOUNDARY_TAGS: &[&str] = &[
    "IN", "TO", "WDT", "WP", "WP$", ",", ":", "-LRB-", "(", "VBZ", "VBP",
];

/// Participles and past forms; they modify the noun until a nominal is seen
/// ("the retired general") and end the phrase after one ("the man arrested").
const PARTICIPLE_TAGS: &[&str] = &["VBG", "VBN", "VBD"];

/// Tags a head is drawn from.
fn is_nominal_tag(tag: &str) -> bool {
    tag.starts_with("NN") || matches!(tag, "PRP" | "PRP$" | "CD" | "WP" | "EX")
}

/// Determiners, possessive markers and punctuation.
fn is_function_tag(tag: &str) -> bool {
    matches!(tag, "DT" | "PDT" | "POS" | "CC") || !tag.chars().any(char::is_alphanumeric)
}

/// Head token of a noun phrase given its tokens in order.
///
/// The phrase is cut at the first preposition, relative pronoun, comma or
/// finite verb after the first token, or at a participle following a
/// nominal; the head is the last nominal token before the cut. "the book on
/// the table" has head "book".
pub fn head_of(words: &[Annotation]) -> Option<&Annotation> {
    let mut seen_nominal = words.first().map_or(false, |word| is_nominal_tag(word.kind()));
    let mut cut = words.len();
    for (idx, word) in words.iter().enumerate().skip(1) {
        let tag = word.kind();
        if BOUNDARY_TAGS.contains(&tag) || (seen_nominal && PARTICIPLE_TAGS.contains(&tag)) {
            cut = idx;
            break;
        }
        seen_nominal |= is_nominal_tag(tag);
    }
    let prefix = &words[..cut];
    prefix
        .iter()
        .rev()
        .find(|word| is_nominal_tag(word.kind()))
        .or_else(|| prefix.iter().rev().find(|word| !is_function_tag(word.kind())))
        .or_else(|| prefix.last())
}

/// Tokens lying inside the mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordsProperty;

impl Property for WordsProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Words
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let postag = doc.require_set(names::POSTAG)?;
        let words = postag
            .contained_span(mention)
            .map(|set| set.to_vec())
            .unwrap_or_default();
        Ok(PropertyValue::Spans(words))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadNounProperty;

impl Property for HeadNounProperty {
    fn id(&self) -> PropertyId {
        PropertyId::HeadNoun
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[PropertyId::Words]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let words = engine.spans(PropertyId::Words, mention, doc)?;
        Ok(head_of(&words).cloned().into())
    }
}

/// POS tag of the head token.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadPosProperty;

impl Property for HeadPosProperty {
    fn id(&self) -> PropertyId {
        PropertyId::HeadPos
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[PropertyId::HeadNoun]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        Ok(match engine.span(PropertyId::HeadNoun, mention, doc)? {
            Some(head) => PropertyValue::Text(head.kind().to_string()),
            None => PropertyValue::None,
        })
    }
}

/// Whether the mention coordinates phrases ("John and Mary").
#[derive(Debug, Clone, Copy, Default)]
pub struct ConjunctionProperty;

impl Property for ConjunctionProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Conjunction
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[PropertyId::Words]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let words = engine.spans(PropertyId::Words, mention, doc)?;
        let inner = words.len().saturating_sub(1);
        let coordinated = words
            .iter()
            .enumerate()
            .any(|(idx, word)| idx > 0 && idx < inner && word.kind() == "CC");
        Ok(PropertyValue::Bool(coordinated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fixtures::{engine, mention, tagged, with_mentions};

    #[test]
    fn test_head_cuts_at_preposition() {
        let mut doc = tagged(
            "I read the book on the table .",
            &["PRP", "VBD", "DT", "NN", "IN", "DT", "NN", "."],
        );
        with_mentions(&mut doc, &["the book on the table"]);
        let np = mention(&mut doc, "the book on the table");
        let mut engine = engine();

        let head = engine.span(PropertyId::HeadNoun, &np, &mut doc).unwrap().unwrap();
        assert_eq!(&*doc.annot_text(&head).unwrap(), "book");
        assert_eq!(
            engine.text(PropertyId::HeadPos, &np, &mut doc).unwrap().as_deref(),
            Some("NN")
        );
        assert_eq!(engine.spans(PropertyId::Words, &np, &mut doc).unwrap().len(), 5);
    }

    #[test]
    fn test_participle_modifier_is_not_a_cut() {
        let mut doc = tagged(
            "the retired general met the running man , the man arrested yesterday",
            &["DT", "VBN", "NN", "VBD", "DT", "VBG", "NN", ",", "DT", "NN", "VBN", "NN"],
        );
        with_mentions(
            &mut doc,
            &["the retired general", "the running man", "the man arrested yesterday"],
        );
        let mut engine = engine();

        for (phrase, expected) in [
            ("the retired general", "general"),
            ("the running man", "man"),
            ("the man arrested yesterday", "man"),
        ] {
            let np = mention(&mut doc, phrase);
            let head = engine.span(PropertyId::HeadNoun, &np, &mut doc).unwrap().unwrap();
            assert_eq!(&*doc.annot_text(&head).unwrap(), expected, "head of '{phrase}'");
        }
    }

    #[test]
    fn test_head_skips_possessive_marker() {
        let mut doc = tagged(
            "the company 's chief resigned",
            &["DT", "NN", "POS", "NN", "VBD"],
        );
        with_mentions(&mut doc, &["the company 's", "the company 's chief"]);
        let mut engine = engine();

        let owner = mention(&mut doc, "the company 's");
        let head = engine.span(PropertyId::HeadNoun, &owner, &mut doc).unwrap().unwrap();
        assert_eq!(&*doc.annot_text(&head).unwrap(), "company");

        let whole = mention(&mut doc, "the company 's chief");
        let head = engine.span(PropertyId::HeadNoun, &whole, &mut doc).unwrap().unwrap();
        assert_eq!(&*doc.annot_text(&head).unwrap(), "chief");
    }

    #[test]
    fn test_conjunction() {
        let mut doc = tagged("John and Mary left", &["NNP", "CC", "NNP", "VBD"]);
        with_mentions(&mut doc, &["John and Mary", "Mary"]);
        let mut engine = engine();

        let both = mention(&mut doc, "John and Mary");
        assert!(engine.flag(PropertyId::Conjunction, &both, &mut doc).unwrap());
        let mary = mention(&mut doc, "Mary");
        assert!(!engine.flag(PropertyId::Conjunction, &mary, &mut doc).unwrap());
    }

    #[test]
    fn test_words_require_postag() {
        let mut doc = Document::from_text("bare", "no tags here").unwrap();
        let np = Annotation::new(1, 0, 2, "NP").unwrap();
        let mut engine = engine();
        let err = engine.value(PropertyId::Words, &np, &mut doc).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"document 'bare' has no annotation set 'postag'");
    }
}
