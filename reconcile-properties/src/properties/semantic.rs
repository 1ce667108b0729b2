//! Proper names and semantic classes.

use std::sync::Arc;

use reconcile::Annotation;
use reconcile_document::{names, Document};

use super::lower_text;
use crate::lexicon::SemanticLexicon;
use crate::value::SemClass;
use crate::{Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

/// Head tagged as a proper noun.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProperNameProperty;

impl Property for ProperNameProperty {
    fn id(&self) -> PropertyId {
        PropertyId::ProperName
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
        let head = engine.span(PropertyId::HeadNoun, mention, doc)?;
        let proper = head.map_or(false, |head| matches!(head.kind(), "NNP" | "NNPS"));
        Ok(proper.into())
    }
}

/// Class of the named entity covering the head.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProperNameTypeProperty;

impl Property for ProperNameTypeProperty {
    fn id(&self) -> PropertyId {
        PropertyId::ProperNameType
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
        let entities = doc.require_set(names::NE)?;
        let Some(head) = engine.span(PropertyId::HeadNoun, mention, doc)? else {
            return Ok(PropertyValue::SemClass(SemClass::Unknown));
        };
        let class = entities
            .covering_span(&head)
            .iter()
            .map(|entity| SemClass::from_ne_label(entity.kind()))
            .find(|class| *class != SemClass::Unknown)
            .unwrap_or(SemClass::Unknown);
        Ok(PropertyValue::SemClass(class))
    }
}

/// Lexicon class of the head word.
#[derive(Clone)]
pub struct WnSemClassProperty {
    lexicon: Arc<dyn SemanticLexicon>,
}

impl WnSemClassProperty {
    pub fn new(lexicon: Arc<dyn SemanticLexicon>) -> Self {
        Self { lexicon }
    }
}

impl Property for WnSemClassProperty {
    fn id(&self) -> PropertyId {
        PropertyId::WnSemClass
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
        let class = match engine.span(PropertyId::HeadNoun, mention, doc)? {
            Some(head) => self.lexicon.sem_class(&lower_text(&head, doc)?),
            None => SemClass::Unknown,
        };
        Ok(PropertyValue::SemClass(class))
    }
}

/// Class implied by a pronoun, or `None` for other words.
fn pronoun_class(word: &str) -> Option<SemClass> {
    match word {
        "he" | "him" | "his" | "himself" => Some(SemClass::Male),
        "she" | "her" | "hers" | "herself" => Some(SemClass::Female),
        "i" | "me" | "my" | "mine" | "myself" | "we" | "us" | "our" | "ours" | "ourselves"
        | "you" | "your" | "yours" | "yourself" | "yourselves" | "who" | "whom" => {
            Some(SemClass::Person)
        }
        "it" | "its" | "itself" | "which" => Some(SemClass::Object),
        _ => None,
    }
}

/// Merged class: pronoun, then named entity, then lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpSemanticTypeProperty;

impl Property for NpSemanticTypeProperty {
    fn id(&self) -> PropertyId {
        PropertyId::NpSemanticType
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[
            PropertyId::Pronoun,
            PropertyId::ProperNameType,
            PropertyId::WnSemClass,
        ]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        if engine.pronoun(PropertyId::Pronoun, mention, doc)?.is_pronoun() {
            let class = pronoun_class(&lower_text(mention, doc)?).unwrap_or(SemClass::Unknown);
            return Ok(PropertyValue::SemClass(class));
        }
        let named = engine.sem_class(PropertyId::ProperNameType, mention, doc)?;
        if named != SemClass::Unknown {
            return Ok(PropertyValue::SemClass(named));
        }
        let class = engine.sem_class(PropertyId::WnSemClass, mention, doc)?;
        Ok(PropertyValue::SemClass(class))
    }
}

impl std::fmt::Debug for WnSemClassProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WnSemClassProperty").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fixtures::{engine, mention, tagged, with_mentions};
    use reconcile::AnnotationSet;

    fn senate_doc() -> Document {
        let mut doc = tagged(
            "Senator Smith told the company that he met Acme",
            &["NNP", "NNP", "VBD", "DT", "NN", "IN", "PRP", "VBD", "NNP"],
        );
        let mut entities = AnnotationSet::new(names::NE);
        entities.add_span(8, 13, "PERSON").unwrap();
        entities.add_span(43, 47, "ORGANIZATION").unwrap();
        doc.add_annotation_set(entities, names::NE, false).unwrap();
        with_mentions(&mut doc, &["Senator Smith", "the company", "he", "Acme"]);
        doc
    }

    #[test]
    fn test_semantic_classes() {
        let mut doc = senate_doc();
        let mut engine = engine();

        let smith = mention(&mut doc, "Senator Smith");
        assert!(engine.flag(PropertyId::ProperName, &smith, &mut doc).unwrap());
        assert_eq!(
            engine.sem_class(PropertyId::NpSemanticType, &smith, &mut doc).unwrap(),
            SemClass::Person
        );

        let company = mention(&mut doc, "the company");
        assert!(!engine.flag(PropertyId::ProperName, &company, &mut doc).unwrap());
        assert_eq!(
            engine.sem_class(PropertyId::WnSemClass, &company, &mut doc).unwrap(),
            SemClass::Organization
        );

        let he = mention(&mut doc, "he");
        assert_eq!(
            engine.sem_class(PropertyId::NpSemanticType, &he, &mut doc).unwrap(),
            SemClass::Male
        );

        let acme = mention(&mut doc, "Acme");
        assert_eq!(
            engine.sem_class(PropertyId::ProperNameType, &acme, &mut doc).unwrap(),
            SemClass::Organization
        );
    }
}
