//! Grammatical features: pronouns, determiners, agreement and syntax.

use reconcile_properties::{
    Animacy as AnimacyValue, Gender, GramRole, Number, PropertyId,
};

use super::{define_feature, C_I, C_I_NA, Y_N};
use crate::value::NOT_APPLICABLE;
use crate::{FeatureKind, FeatureValue};

define_feature!(
    Pronoun1, "Pronoun1", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.pronoun(a)?.is_pronoun()))
    }
);

define_feature!(
    Pronoun2, "Pronoun2", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.pronoun(b)?.is_pronoun()))
    }
);

define_feature!(
    Definite2, "Definite2", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.flag(PropertyId::Definite, b)?))
    }
);

define_feature!(
    Demonstrative2, "Demonstrative2", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.flag(PropertyId::Demonstrative, b)?))
    }
);

define_feature!(
    /// `C` when both are proper names, `I` when one is, `NA` otherwise.
    BothProperNouns, "BothProperNouns", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        let left = ctx.flag(PropertyId::ProperName, a)?;
        let right = ctx.flag(PropertyId::ProperName, b)?;
        Ok(match (left, right) {
            (true, true) => FeatureValue::compatible(true),
            (false, false) => FeatureValue::Nominal(NOT_APPLICABLE),
            _ => FeatureValue::compatible(false),
        })
    }
);

define_feature!(
    NumberAgreement, "Number", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        Ok(match (ctx.number(a)?, ctx.number(b)?) {
            (Number::Unknown, _) | (_, Number::Unknown) => FeatureValue::Nominal(NOT_APPLICABLE),
            (left, right) => FeatureValue::compatible(left == right),
        })
    }
);

define_feature!(
    GenderAgreement, "Gender", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        Ok(match (ctx.gender(a)?, ctx.gender(b)?) {
            (Gender::Unknown, _) | (_, Gender::Unknown) => FeatureValue::Nominal(NOT_APPLICABLE),
            (left, right) => FeatureValue::compatible(left.compatible(right)),
        })
    }
);

define_feature!(
    Animacy, "Animacy", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        Ok(match (ctx.animacy(a)?, ctx.animacy(b)?) {
            (AnimacyValue::Unknown, _) | (_, AnimacyValue::Unknown) => {
                FeatureValue::Nominal(NOT_APPLICABLE)
            }
            (left, right) => FeatureValue::compatible(left == right),
        })
    }
);

define_feature!(
    Subject1, "Subject1", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.gram_role(a)? == GramRole::Subject))
    }
);

define_feature!(
    Subject2, "Subject2", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.gram_role(b)? == GramRole::Subject))
    }
);

define_feature!(
    Embedded1, "Embedded1", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.flag(PropertyId::Embedded, a)?))
    }
);

define_feature!(
    Embedded2, "Embedded2", FeatureKind::Nominal(Y_N), |a, b, ctx, row| {
        Ok(FeatureValue::yes_no(ctx.flag(PropertyId::Embedded, b)?))
    }
);

define_feature!(
    /// `I` when both lie inside the same maximal noun phrase.
    MaximalNp, "MaximalNP", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let left = ctx.span(PropertyId::MaximalNp, a)?;
        let right = ctx.span(PropertyId::MaximalNp, b)?;
        let shared = matches!((left, right), (Some(l), Some(r)) if l.key() == r.key());
        Ok(FeatureValue::compatible(!shared))
    }
);

define_feature!(
    /// `I` when one mention properly contains the other.
    SpanFeature, "Span", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let nested = a.proper_covers_span(b) || b.proper_covers_span(a);
        Ok(FeatureValue::compatible(!nested))
    }
);

define_feature!(
    /// The anaphor follows the antecedent across a single comma ("Smith, the senator").
    Appositive, "Appositive", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        if a.end() > b.start() {
            return Ok(FeatureValue::compatible(false));
        }
        let text = ctx.doc.raw_text()?;
        let between = text.get(a.end()..b.start()).unwrap_or_default().trim();
        let appositive = between == ","
            && !ctx.pronoun(a)?.is_pronoun()
            && !ctx.pronoun(b)?.is_pronoun()
            && ctx.int(PropertyId::SentNum, a)? == ctx.int(PropertyId::SentNum, b)?;
        Ok(FeatureValue::compatible(appositive))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, mentions, story};
    use crate::{Feature, FeatureContext, FeatureRow};
    use reconcile::Annotation;

    #[test]
    fn test_grammatical_features_on_story() {
        let mut doc = story();
        let mut engine = engine();
        let nps = mentions(&mut doc);
        let (john, senator, ibm, we, smith) = (&nps[0], &nps[1], &nps[2], &nps[3], &nps[4]);
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let row = FeatureRow::new();

        let value = |f: &dyn Feature, a: &Annotation, b: &Annotation, ctx: &mut FeatureContext<'_>| {
            f.value(a, b, ctx, &row).unwrap().to_string()
        };
        assert_eq!(value(&Appositive, john, senator, &mut ctx), "C");
        assert_eq!(value(&Appositive, senator, ibm, &mut ctx), "I");
        assert_eq!(value(&Pronoun2, ibm, we, &mut ctx), "Y");
        assert_eq!(value(&Definite2, john, senator, &mut ctx), "Y");
        assert_eq!(value(&BothProperNouns, john, smith, &mut ctx), "C");
        assert_eq!(value(&BothProperNouns, john, senator, &mut ctx), "I");
        assert_eq!(value(&NumberAgreement, john, we, &mut ctx), "I");
        assert_eq!(value(&GenderAgreement, john, ibm, &mut ctx), "I");
        assert_eq!(value(&GenderAgreement, john, smith, &mut ctx), "C");
        assert_eq!(value(&Animacy, ibm, smith, &mut ctx), "I");
        assert_eq!(value(&Subject1, john, ibm, &mut ctx), "Y");
        assert_eq!(value(&Subject2, john, ibm, &mut ctx), "N");
        assert_eq!(value(&MaximalNp, john, senator, &mut ctx), "C");
        assert_eq!(value(&SpanFeature, john, senator, &mut ctx), "C");
    }
}
