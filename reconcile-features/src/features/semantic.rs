//! Semantic class features.

use reconcile_properties::{PropertyId, SemClass};

use super::{define_feature, C_I_NA};
use crate::value::NOT_APPLICABLE;
use crate::{FeatureKind, FeatureValue};

define_feature!(
    /// Semantic classes agree, a class agreeing with its ancestors.
    SemClassAgreement, "SemClass", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        let left = ctx.sem_class(PropertyId::NpSemanticType, a)?;
        let right = ctx.sem_class(PropertyId::NpSemanticType, b)?;
        Ok(if left == SemClass::Unknown || right == SemClass::Unknown {
            FeatureValue::Nominal(NOT_APPLICABLE)
        } else {
            FeatureValue::compatible(left.compatible(right))
        })
    }
);

define_feature!(
    /// Named-entity classes of two proper names match.
    ProperNameType, "ProperNameType", FeatureKind::Nominal(C_I_NA), |a, b, ctx, row| {
        let left = ctx.sem_class(PropertyId::ProperNameType, a)?;
        let right = ctx.sem_class(PropertyId::ProperNameType, b)?;
        Ok(if left == SemClass::Unknown || right == SemClass::Unknown {
            FeatureValue::Nominal(NOT_APPLICABLE)
        } else {
            FeatureValue::compatible(left == right)
        })
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, mentions, story};
    use crate::{Feature, FeatureContext, FeatureRow};

    #[test]
    fn test_semantic_features_on_story() {
        let mut doc = story();
        let mut engine = engine();
        let nps = mentions(&mut doc);
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let row = FeatureRow::new();

        let check = |f: &dyn Feature, i: usize, j: usize, ctx: &mut FeatureContext<'_>| {
            f.value(&nps[i], &nps[j], ctx, &row).unwrap().to_string()
        };
        // John Smith / the senator
        assert_eq!(check(&SemClassAgreement, 0, 1, &mut ctx), "C");
        // John Smith / IBM
        assert_eq!(check(&SemClassAgreement, 0, 2, &mut ctx), "I");
        assert_eq!(check(&ProperNameType, 0, 2, &mut ctx), "I");
        // John Smith / Smith
        assert_eq!(check(&ProperNameType, 0, 4, &mut ctx), "C");
        // the senator has no entity class
        assert_eq!(check(&ProperNameType, 0, 1, &mut ctx), "NA");
    }
}
