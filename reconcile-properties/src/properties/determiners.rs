//! Determiner-driven properties.

use reconcile::Annotation;
use reconcile_document::Document;

use super::lower_text;
use crate::lexicon::words;
use crate::{Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

const DETERMINERS: &[&str] = &["the", "a", "an", "this", "that", "these", "those"];
const DEMONSTRATIVES: &[&str] = &["this", "that", "these", "those"];

fn first_word_in(mention: &Annotation, doc: &mut Document, list: &[&str]) -> PropertyResult<bool> {
    let text = lower_text(mention, doc)?;
    Ok(words(&text).first().map_or(false, |word| list.contains(word)))
}

/// Mention starts with "the".
#[derive(Debug, Clone, Copy, Default)]
pub struct DefiniteProperty;

impl Property for DefiniteProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Definite
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        Ok(first_word_in(mention, doc, &["the"])?.into())
    }
}

/// Mention starts with "a" or "an".
#[derive(Debug, Clone, Copy, Default)]
pub struct IndefiniteProperty;

impl Property for IndefiniteProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Indefinite
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        Ok(first_word_in(mention, doc, &["a", "an"])?.into())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemonstrativeProperty;

impl Property for DemonstrativeProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Demonstrative
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        Ok(first_word_in(mention, doc, DEMONSTRATIVES)?.into())
    }
}

/// Lowercased mention text with leading determiners removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDetTextProperty;

impl Property for NoDetTextProperty {
    fn id(&self) -> PropertyId {
        PropertyId::NoDetText
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let text = lower_text(mention, doc)?;
        let stripped = words(&text)
            .into_iter()
            .skip_while(|word| DETERMINERS.contains(word))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(PropertyValue::Text(stripped))
    }
}
