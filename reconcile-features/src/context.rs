//! Per-document state shared by generators and features.

use std::sync::Arc;

use reconcile::Annotation;
use reconcile_document::Document;
use reconcile_properties::{
    Animacy, Gender, GramRole, Number, PronounType, PropertyEngine, PropertyId, PropertyResult,
    PropertyValue, SemClass,
};

/// The document being processed and its property cache.
pub struct FeatureContext<'a> {
    pub doc: &'a mut Document,
    pub engine: &'a mut PropertyEngine,
    /// Training runs draw pairs and labels from gold chains.
    pub training: bool,
}

impl<'a> FeatureContext<'a> {
    pub fn new(doc: &'a mut Document, engine: &'a mut PropertyEngine, training: bool) -> Self {
        Self {
            doc,
            engine,
            training,
        }
    }

    pub fn value(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
    ) -> PropertyResult<Arc<PropertyValue>> {
        self.engine.value(id, mention, self.doc)
    }

    pub fn flag(&mut self, id: PropertyId, mention: &Annotation) -> PropertyResult<bool> {
        self.engine.flag(id, mention, self.doc)
    }

    pub fn int(&mut self, id: PropertyId, mention: &Annotation) -> PropertyResult<Option<i64>> {
        self.engine.int(id, mention, self.doc)
    }

    pub fn text(&mut self, id: PropertyId, mention: &Annotation) -> PropertyResult<Option<String>> {
        self.engine.text(id, mention, self.doc)
    }

    pub fn span(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
    ) -> PropertyResult<Option<Annotation>> {
        self.engine.span(id, mention, self.doc)
    }

    pub fn pronoun(&mut self, mention: &Annotation) -> PropertyResult<PronounType> {
        self.engine.pronoun(PropertyId::Pronoun, mention, self.doc)
    }

    pub fn number(&mut self, mention: &Annotation) -> PropertyResult<Number> {
        self.engine.number(PropertyId::Number, mention, self.doc)
    }

    pub fn gender(&mut self, mention: &Annotation) -> PropertyResult<Gender> {
        self.engine.gender(PropertyId::Gender, mention, self.doc)
    }

    pub fn animacy(&mut self, mention: &Annotation) -> PropertyResult<Animacy> {
        self.engine.animacy(PropertyId::Animacy, mention, self.doc)
    }

    pub fn gram_role(&mut self, mention: &Annotation) -> PropertyResult<GramRole> {
        self.engine.gram_role(PropertyId::GramRole, mention, self.doc)
    }

    pub fn sem_class(&mut self, id: PropertyId, mention: &Annotation) -> PropertyResult<SemClass> {
        self.engine.sem_class(id, mention, self.doc)
    }

    /// Lowercased normalized text of a span.
    pub fn lower_text(&mut self, span: &Annotation) -> PropertyResult<String> {
        Ok(self.doc.annot_text(span)?.to_lowercase())
    }
}
