//! The pairwise feature abstraction.

use reconcile::Annotation;

use crate::{FeatureContext, FeatureKind, FeatureResult, FeatureRow, FeatureValue};

/// A function of an (antecedent, anaphor) pair.
///
/// Features run in configured order; `row` holds the values of the features
/// that ran before this one.
pub trait Feature {
    fn name(&self) -> &'static str;

    fn kind(&self) -> FeatureKind;

    fn value(
        &self,
        antecedent: &Annotation,
        anaphor: &Annotation,
        ctx: &mut FeatureContext<'_>,
        row: &FeatureRow,
    ) -> FeatureResult<FeatureValue>;
}

/// An ordered, configured list of features.
#[derive(Default)]
pub struct FeatureSet {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureSet {
    pub fn new(features: Vec<Box<dyn Feature>>) -> Self {
        Self { features }
    }

    pub fn push(&mut self, feature: Box<dyn Feature>) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Feature> + '_ {
        self.features.iter().map(Box::as_ref)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|feature| feature.name()).collect()
    }

    /// Compute every feature for one pair, in order.
    pub fn row(
        &self,
        antecedent: &Annotation,
        anaphor: &Annotation,
        ctx: &mut FeatureContext<'_>,
    ) -> FeatureResult<FeatureRow> {
        let mut row = FeatureRow::new();
        for feature in &self.features {
            let value = feature.value(antecedent, anaphor, ctx, &row)?;
            row.insert(feature.name(), value);
        }
        Ok(row)
    }
}

impl std::fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
