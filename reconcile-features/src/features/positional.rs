//! Identity, distance and discourse-position features.

use reconcile::Annotation;
use reconcile_document::names;
use reconcile_properties::PropertyId;

use super::{define_feature, C_I};
use crate::{FeatureContext, FeatureKind, FeatureResult, FeatureValue};

/// Attribute of the `docNo` span holding the document number.
pub const DOC_NO_ATTRIBUTE: &str = "docNo";

fn distance(
    id: PropertyId,
    a: &Annotation,
    b: &Annotation,
    ctx: &mut FeatureContext<'_>,
) -> FeatureResult<FeatureValue> {
    Ok(match (ctx.int(id, a)?, ctx.int(id, b)?) {
        (Some(left), Some(right)) => FeatureValue::Numeric((left - right).abs() as f64),
        _ => FeatureValue::Missing,
    })
}

define_feature!(
    /// Number of the document, read from the in-memory `docNo` set.
    DocNo, "DocNo", FeatureKind::Numeric, |a, b, ctx, row| {
        let marker = ctx.doc.require_set(names::DOC_NO)?;
        Ok(marker
            .first()
            .and_then(|span| span.attribute(DOC_NO_ATTRIBUTE))
            .and_then(|number| number.parse::<f64>().ok())
            .map_or(FeatureValue::Missing, FeatureValue::Numeric))
    }
);

define_feature!(
    Id1, "ID1", FeatureKind::Numeric, |a, b, ctx, row| {
        Ok(FeatureValue::Numeric(f64::from(a.id())))
    }
);

define_feature!(
    Id2, "ID2", FeatureKind::Numeric, |a, b, ctx, row| {
        Ok(FeatureValue::Numeric(f64::from(b.id())))
    }
);

define_feature!(
    /// Sentence distance.
    SentNum, "SentNum", FeatureKind::Numeric, |a, b, ctx, row| {
        distance(PropertyId::SentNum, a, b, ctx)
    }
);

define_feature!(
    /// Paragraph distance.
    ParNum, "ParNum", FeatureKind::Numeric, |a, b, ctx, row| {
        distance(PropertyId::ParNum, a, b, ctx)
    }
);

define_feature!(
    BothInQuotes, "BothInQuotes", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let both = ctx.int(PropertyId::InQuote, a)?.is_some()
            && ctx.int(PropertyId::InQuote, b)?.is_some();
        Ok(FeatureValue::compatible(both))
    }
);

define_feature!(
    /// One mention is the speaker of the quotation holding the other.
    QuoteAuthor, "QuoteAuthor", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let speaks_for = |author: Option<Annotation>, other: &Annotation| {
            author.map_or(false, |author| author.key() == other.key())
        };
        let linked = speaks_for(ctx.span(PropertyId::Author, b)?, a)
            || speaks_for(ctx.span(PropertyId::Author, a)?, b);
        Ok(FeatureValue::compatible(linked))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, mentions, story};
    use crate::{Feature, FeatureRow};
    use reconcile::{AnnotationSet, Features};

    #[test]
    fn test_positional_features_on_story() {
        let mut doc = story();
        let mut marker = AnnotationSet::new(names::DOC_NO);
        let mut features = Features::new();
        features.insert(DOC_NO_ATTRIBUTE.to_string(), "12".to_string());
        marker.add_span_with_features(0, 0, "docNo", features).unwrap();
        doc.add_annotation_set(marker, names::DOC_NO, false).unwrap();

        let mut engine = engine();
        let nps = mentions(&mut doc);
        let (john, ibm, we, smith) = (&nps[0], &nps[2], &nps[3], &nps[4]);
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let row = FeatureRow::new();

        let value = |f: &dyn Feature, a: &Annotation, b: &Annotation, ctx: &mut FeatureContext<'_>| {
            f.value(a, b, ctx, &row).unwrap().to_string()
        };
        assert_eq!(value(&DocNo, john, ibm, &mut ctx), "12");
        assert_eq!(value(&Id1, john, ibm, &mut ctx), "1");
        assert_eq!(value(&Id2, john, ibm, &mut ctx), "3");
        assert_eq!(value(&SentNum, john, we, &mut ctx), "1");
        assert_eq!(value(&ParNum, john, we, &mut ctx), "0");
        assert_eq!(value(&BothInQuotes, john, we, &mut ctx), "I");
        assert_eq!(value(&QuoteAuthor, we, smith, &mut ctx), "C");
        assert_eq!(value(&QuoteAuthor, john, we, &mut ctx), "I");
    }
}
