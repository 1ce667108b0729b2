//! The instance label.

use reconcile_document::names;
use reconcile_properties::PropertyId;

use super::define_feature;
use crate::{FeatureKind, FeatureValue};

pub const POSITIVE: &str = "+";
pub const NEGATIVE: &str = "-";

define_feature!(
    /// `+` when both mentions share a gold chain, `-` otherwise; unknown
    /// without gold mentions.
    ClassLabel, "class", FeatureKind::Nominal(&[POSITIVE, NEGATIVE]), |a, b, ctx, row| {
        if !ctx.doc.has_annotation_set(names::GOLD_NPS) {
            return Ok(FeatureValue::Missing);
        }
        let left = ctx.text(PropertyId::CorefId, a)?;
        let right = ctx.text(PropertyId::CorefId, b)?;
        let same = matches!((left, right), (Some(l), Some(r)) if l == r);
        Ok(FeatureValue::Nominal(if same { POSITIVE } else { NEGATIVE }))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, mentions, story};
    use crate::{Feature, FeatureContext, FeatureRow};
    use reconcile_document::Document;

    #[test]
    fn test_labels_follow_gold_chains() {
        let mut doc = story();
        let mut engine = engine();
        let nps = mentions(&mut doc);
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, true);
        let row = FeatureRow::new();

        let label = |i: usize, j: usize, ctx: &mut FeatureContext<'_>| {
            ClassLabel.value(&nps[i], &nps[j], ctx, &row).unwrap().to_string()
        };
        assert_eq!(label(0, 4, &mut ctx), "+");
        assert_eq!(label(1, 4, &mut ctx), "+");
        assert_eq!(label(0, 2, &mut ctx), "-");
        // "We" has no gold mention
        assert_eq!(label(3, 3, &mut ctx), "-");
    }

    #[test]
    fn test_label_missing_without_gold() {
        let mut doc = Document::from_text("plain", "Smith left").unwrap();
        let mut engine = engine();
        let mention = reconcile::Annotation::new(1, 0, 5, "NP").unwrap();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let value = ClassLabel
            .value(&mention, &mention, &mut ctx, &FeatureRow::new())
            .unwrap();
        assert_eq!(value, FeatureValue::Missing);
    }
}
