//! Sentence and paragraph numbering.

use reconcile::{Annotation, AnnotationSet};
use reconcile_document::{names, Document};

use crate::{Computed, Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

/// Starts of the units of `set`, in order.
fn unit_starts(set: &AnnotationSet) -> Vec<usize> {
    set.iter().map(Annotation::start).collect()
}

/// Index of the last unit starting at or before the mention.
fn unit_index(starts: &[usize], mention: &Annotation) -> PropertyValue {
    match starts.partition_point(|start| *start <= mention.start()) {
        0 => PropertyValue::None,
        idx => PropertyValue::Int(idx as i64 - 1),
    }
}

fn number_all(
    id: PropertyId,
    units: &str,
    mentions: &AnnotationSet,
    doc: &mut Document,
) -> PropertyResult<Vec<Computed>> {
    let starts = unit_starts(&*doc.require_set(units)?);
    Ok(mentions
        .iter()
        .map(|mention| Computed::new(id, mention, unit_index(&starts, mention)))
        .collect())
}

/// Zero-based index of the sentence holding the mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentNumProperty;

impl Property for SentNumProperty {
    fn id(&self) -> PropertyId {
        PropertyId::SentNum
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
        let starts = unit_starts(&*doc.require_set(names::SENTENCE)?);
        Ok(unit_index(&starts, mention))
    }

    fn produce_all(
        &self,
        mentions: &AnnotationSet,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<Vec<Computed>> {
        number_all(self.id(), names::SENTENCE, mentions, doc)
    }
}

/// Zero-based index of the paragraph holding the mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParNumProperty;

impl Property for ParNumProperty {
    fn id(&self) -> PropertyId {
        PropertyId::ParNum
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
        let starts = unit_starts(&*doc.require_set(names::PARAGRAPH)?);
        Ok(unit_index(&starts, mention))
    }

    fn produce_all(
        &self,
        mentions: &AnnotationSet,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<Vec<Computed>> {
        number_all(self.id(), names::PARAGRAPH, mentions, doc)
    }
}
