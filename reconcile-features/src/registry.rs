//! Name-to-constructor maps for configurable components.

use std::collections::BTreeMap;

use crate::features::*;
use crate::{Feature, FeatureError, FeatureResult, FeatureSet};

type FeatureConstructor = fn() -> Box<dyn Feature>;

/// Explicit registry of feature constructors keyed by feature name.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    constructors: BTreeMap<&'static str, FeatureConstructor>,
}

macro_rules! constructors {
    ($($ty:ident),* $(,)?) => {
        vec![$((<$ty as Default>::default().name(), (|| Box::new($ty) as Box<dyn Feature>) as FeatureConstructor)),*]
    };
}

impl FeatureRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in feature.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        let builtins: Vec<(&'static str, FeatureConstructor)> = constructors![
            DocNo,
            Id1,
            Id2,
            SoonStr,
            WordsStr,
            HeadMatch,
            ProStr,
            PnStr,
            Pronoun1,
            Pronoun2,
            Definite2,
            Demonstrative2,
            BothProperNouns,
            NumberAgreement,
            GenderAgreement,
            Animacy,
            SemClassAgreement,
            ProperNameType,
            Subject1,
            Subject2,
            Embedded1,
            Embedded2,
            MaximalNp,
            SpanFeature,
            Appositive,
            Alias,
            SentNum,
            ParNum,
            BothInQuotes,
            QuoteAuthor,
            ClassLabel,
        ];
        for (name, constructor) in builtins {
            registry.register(name, constructor);
        }
        registry
    }

    pub fn register(&mut self, name: &'static str, constructor: FeatureConstructor) {
        self.constructors.insert(name, constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn create(&self, name: &str) -> FeatureResult<Box<dyn Feature>> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))
    }

    /// Build the features named by `names`, in that order.
    pub fn build<S: AsRef<str>>(&self, names: &[S]) -> FeatureResult<FeatureSet> {
        let mut set = FeatureSet::default();
        for name in names {
            set.push(self.create(name.as_ref())?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_in_configured_order() {
        let registry = FeatureRegistry::standard();
        let set = registry.build(&["SoonStr", "DocNo", "class"]).unwrap();
        assert_eq!(set.names(), vec!["SoonStr", "DocNo", "class"]);
    }

    #[test]
    fn test_unknown_feature_is_a_config_error() {
        let registry = FeatureRegistry::standard();
        let err = registry.build(&["SoonStr", "Bogus"]).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"unknown feature 'Bogus'");
    }

    #[test]
    fn test_every_builtin_is_named() {
        let registry = FeatureRegistry::standard();
        assert_eq!(registry.names().count(), 31);
        assert!(registry.contains("MaximalNP"));
        assert!(registry.contains("Number"));
    }
}
