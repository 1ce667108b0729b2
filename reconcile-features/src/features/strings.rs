//! String-match features.

use reconcile::Annotation;
use reconcile_properties::lexicon::words;
use reconcile_properties::{PropertyId, SemClass};

use super::{define_feature, C_I, C_I_NA};
use crate::{FeatureContext, FeatureKind, FeatureResult, FeatureValue};

const ACRONYM_STOPWORDS: &[&str] = &["of", "the", "and", "for", "&"];

/// Initials of the capitalized words of `text`.
fn acronym(text: &str) -> String {
    words(text)
        .into_iter()
        .filter(|word| !ACRONYM_STOPWORDS.contains(&word.to_lowercase().as_str()))
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_uppercase())
        .collect()
}

/// Whether the shorter text is the acronym of the longer one.
pub(crate) fn is_acronym_pair(a: &str, b: &str) -> bool {
    let (long, short) = if words(a).len() >= words(b).len() {
        (a, b)
    } else {
        (b, a)
    };
    let short: String = short.chars().filter(|c| *c != '.').collect();
    if short.len() < 2 || short.contains(' ') {
        return false;
    }
    let initials = acronym(long);
    initials.len() >= 2 && initials == short
}

fn head_text(ctx: &mut FeatureContext<'_>, mention: &Annotation) -> FeatureResult<Option<String>> {
    match ctx.span(PropertyId::HeadNoun, mention)? {
        Some(head) => Ok(Some(ctx.lower_text(&head)?)),
        None => Ok(None),
    }
}

define_feature!(
    /// Texts match once leading determiners are dropped.
    SoonStr, "SoonStr", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let left = ctx.text(PropertyId::NoDetText, a)?;
        let right = ctx.text(PropertyId::NoDetText, b)?;
        let same = matches!((left, right), (Some(l), Some(r)) if !l.is_empty() && l == r);
        Ok(FeatureValue::compatible(same))
    }
);

define_feature!(
    /// Full texts match, ignoring case.
    WordsStr, "WordsStr", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let same = ctx.lower_text(a)? == ctx.lower_text(b)?;
        Ok(FeatureValue::compatible(same))
    }
);

define_feature!(
    /// Head words match.
    HeadMatch, "HeadMatch", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        let left = head_text(ctx, a)?;
        let right = head_text(ctx, b)?;
        Ok(match (left, right) {
            (Some(l), Some(r)) => FeatureValue::compatible(l == r),
            _ => FeatureValue::Nominal(crate::value::NOT_APPLICABLE),
        })
    }
);

define_feature!(
    /// Both are the same pronoun.
    ProStr, "ProStr", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let both = ctx.pronoun(a)?.is_pronoun() && ctx.pronoun(b)?.is_pronoun();
        let same = both && ctx.lower_text(a)? == ctx.lower_text(b)?;
        Ok(FeatureValue::compatible(same))
    }
);

define_feature!(
    /// Both are the same proper name.
    PnStr, "PNStr", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let both = ctx.flag(PropertyId::ProperName, a)? && ctx.flag(PropertyId::ProperName, b)?;
        let same = both && ctx.lower_text(a)? == ctx.lower_text(b)?;
        Ok(FeatureValue::compatible(same))
    }
);

define_feature!(
    /// One is an acronym of the other, or both name the same person by surname.
    Alias, "Alias", FeatureKind::Nominal(C_I), |a, b, ctx, row| {
        let left = ctx.doc.annot_text(a)?;
        let right = ctx.doc.annot_text(b)?;
        if is_acronym_pair(&left, &right) {
            return Ok(FeatureValue::compatible(true));
        }
        let people = ctx.sem_class(PropertyId::ProperNameType, a)? == SemClass::Person
            && ctx.sem_class(PropertyId::ProperNameType, b)? == SemClass::Person;
        let surname = |text: &str| words(text).last().map(|word| word.to_lowercase());
        let same_surname = people && surname(&left).is_some() && surname(&left) == surname(&right);
        Ok(FeatureValue::compatible(same_surname))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, mentions, story};
    use crate::Feature;
    use crate::FeatureRow;

    #[test]
    fn test_acronyms() {
        assert!(is_acronym_pair("International Business Machines", "IBM"));
        assert!(is_acronym_pair("U.N.", "United Nations"));
        assert!(is_acronym_pair("Bank of America", "BA"));
        assert!(!is_acronym_pair("International Business Machines", "IBX"));
        assert!(!is_acronym_pair("the senator", "TS"));
    }

    #[test]
    fn test_string_features_on_story() {
        let mut doc = story();
        let mut engine = engine();
        let nps = mentions(&mut doc);
        let (john, senator, last_smith) = (&nps[0], &nps[1], &nps[4]);
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let row = FeatureRow::new();

        let value = |f: &dyn Feature, a: &Annotation, b: &Annotation, ctx: &mut FeatureContext<'_>| {
            f.value(a, b, ctx, &row).unwrap().to_string()
        };
        assert_eq!(value(&SoonStr, john, senator, &mut ctx), "I");
        assert_eq!(value(&HeadMatch, john, last_smith, &mut ctx), "C");
        assert_eq!(value(&HeadMatch, john, senator, &mut ctx), "I");
        assert_eq!(value(&Alias, john, last_smith, &mut ctx), "C");
        assert_eq!(value(&PnStr, john, last_smith, &mut ctx), "I");
        assert_eq!(value(&WordsStr, last_smith, last_smith, &mut ctx), "C");
    }
}
