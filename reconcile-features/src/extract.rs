//! Feature extraction over one document.

use reconcile::{Annotation, AnnotationId, AnnotationSet};
use reconcile_document::{names, Document};
use tracing::debug;

use crate::features::DOC_NO_ATTRIBUTE;
use crate::{FeatureContext, FeatureResult, FeatureRow, FeatureSet, PairGenerator};

/// Instances produced for one document, in generator order.
#[derive(Debug, Clone, Default)]
pub struct Instances {
    pub pairs: Vec<(AnnotationId, AnnotationId)>,
    pub rows: Vec<FeatureRow>,
}

impl Instances {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drain `generator` over the document's `nps` mentions and compute a row
/// for every pair.
pub fn extract(
    generator: &mut dyn PairGenerator,
    features: &FeatureSet,
    ctx: &mut FeatureContext<'_>,
) -> FeatureResult<Instances> {
    let mentions = ctx.doc.require_set(names::NPS)?;
    generator.initialize(&mentions, ctx)?;

    let mut instances = Instances::default();
    while let Some((antecedent, anaphor)) = generator.next_pair() {
        let row = features.row(&antecedent, &anaphor, ctx)?;
        instances.pairs.push((antecedent.id(), anaphor.id()));
        instances.rows.push(row);
    }
    debug!(
        doc = %ctx.doc.id(),
        generator = generator.name(),
        mentions = mentions.len(),
        instances = instances.len(),
        "extracted features"
    );
    Ok(instances)
}

/// Attach the in-memory `docNo` set: one span over the whole text carrying
/// the document number.
pub fn attach_doc_no(doc: &mut Document, number: usize) -> FeatureResult<()> {
    let text = doc.raw_text()?;
    let mut marker = AnnotationSet::new(names::DOC_NO);
    let mut span = Annotation::new(1, 0, text.len(), names::DOC_NO)?;
    span.set_attribute(DOC_NO_ATTRIBUTE, number.to_string());
    marker.add_ref(span)?;
    doc.add_annotation_set(marker, names::DOC_NO, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, story};
    use crate::features::{ClassLabel, DocNo, Id1, Id2};
    use crate::{write_feature_file, PlainArffWriter, Soon};

    fn features() -> FeatureSet {
        FeatureSet::new(vec![
            Box::new(DocNo),
            Box::new(Id1),
            Box::new(Id2),
            Box::new(ClassLabel),
        ])
    }

    #[test]
    fn test_training_extraction() {
        let mut doc = story();
        attach_doc_no(&mut doc, 7).unwrap();
        let mut engine = engine();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, true);

        let instances = extract(&mut Soon::default(), &features(), &mut ctx).unwrap();
        assert_eq!(instances.pairs, vec![(1, 2), (4, 5), (3, 5), (2, 5)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.arff");
        write_feature_file(&path, &PlainArffWriter, "story", &features(), &instances.rows)
            .unwrap();
        insta::assert_snapshot!(std::fs::read_to_string(&path).unwrap(), @r###"
        @RELATION story

        @ATTRIBUTE DocNo NUMERIC
        @ATTRIBUTE ID1 NUMERIC
        @ATTRIBUTE ID2 NUMERIC
        @ATTRIBUTE class {+,-}

        @DATA
        7,1,2,+
        7,4,5,-
        7,3,5,-
        7,2,5,+
        "###);
    }

    #[test]
    fn test_doc_no_is_not_persisted() {
        let mut doc = story();
        attach_doc_no(&mut doc, 3).unwrap();
        let marker = doc.require_set(names::DOC_NO).unwrap();
        assert_eq!(marker.len(), 1);
        assert_eq!(marker.first().unwrap().attribute(DOC_NO_ATTRIBUTE), Some("3"));
    }
}
