//! Syntactic position of a mention.

use std::cmp::Reverse;

use reconcile::{Annotation, AnnotationSet};
use reconcile_document::{names, Document};

use crate::value::GramRole;
use crate::{Computed, Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

/// Role named by a dependency relation label.
fn role_of(relation: &str) -> GramRole {
    match relation.to_ascii_lowercase().as_str() {
        "nsubj" | "nsubjpass" | "csubj" | "csubjpass" | "xsubj" | "subj" => GramRole::Subject,
        "dobj" | "iobj" | "obj" => GramRole::Object,
        "poss" => GramRole::Possessive,
        "pobj" => GramRole::PrepObject,
        _ => GramRole::None,
    }
}

/// Role of the head token in the dependency set.
#[derive(Debug, Clone, Copy, Default)]
pub struct GramRoleProperty;

impl Property for GramRoleProperty {
    fn id(&self) -> PropertyId {
        PropertyId::GramRole
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
        let relations = doc.require_set(names::DEP)?;
        let role = match engine.span(PropertyId::HeadNoun, mention, doc)? {
            Some(head) => relations
                .exact(head.start(), head.end())
                .iter()
                .map(|relation| role_of(relation.kind()))
                .find(|role| *role != GramRole::None)
                .unwrap_or(GramRole::None),
            None => GramRole::None,
        };
        Ok(PropertyValue::GramRole(role))
    }
}

/// Whether another mention properly covers this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProperty;

impl Property for EmbeddedProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Embedded
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let mentions = doc.require_set(names::NPS)?;
        let embedded = mentions
            .covering_span(mention)
            .iter()
            .any(|other| other.proper_covers_span(mention));
        Ok(embedded.into())
    }
}

/// The outermost mention covering `mention`, earliest start first.
fn outermost(mentions: &AnnotationSet, mention: &Annotation) -> Annotation {
    mentions
        .covering_span(mention)
        .iter()
        .min_by_key(|other| (other.start(), Reverse(other.end())))
        .cloned()
        .unwrap_or_else(|| mention.clone())
}

/// Outermost mention containing this one; a mention outside `nps` maps to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximalNpProperty;

impl Property for MaximalNpProperty {
    fn id(&self) -> PropertyId {
        PropertyId::MaximalNp
    }

    fn whole_document(&self) -> bool {
        true
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let mentions = doc.require_set(names::NPS)?;
        Ok(PropertyValue::Span(outermost(&mentions, mention)))
    }

    fn produce_all(
        &self,
        mentions: &AnnotationSet,
        _engine: &mut PropertyEngine,
        _doc: &mut Document,
    ) -> PropertyResult<Vec<Computed>> {
        Ok(mentions
            .iter()
            .map(|mention| {
                Computed::new(
                    self.id(),
                    mention,
                    PropertyValue::Span(outermost(mentions, mention)),
                )
            })
            .collect())
    }
}
