//! Explicit registry of property implementations.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::lexicon::{SemanticLexicon, StaticLexicon};
use crate::properties::standard_properties;
use crate::{Property, PropertyError, PropertyId, PropertyResult};

/// Maps each [`PropertyId`] to its implementation.
///
/// Lexicons are injected at construction; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: BTreeMap<PropertyId, Box<dyn Property>>,
}

impl PropertyRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in property backed by the embedded lexicon.
    pub fn standard() -> PropertyResult<Self> {
        Self::with_lexicon(Arc::new(StaticLexicon::builtin()))
    }

    /// Every built-in property backed by `lexicon`.
    pub fn with_lexicon(lexicon: Arc<dyn SemanticLexicon>) -> PropertyResult<Self> {
        let mut registry = Self::empty();
        for property in standard_properties(lexicon) {
            registry.register(property);
        }
        registry.validate()?;
        debug!(properties = registry.len(), "property registry ready");
        Ok(registry)
    }

    /// Register `property`, returning the implementation it replaces.
    pub fn register(&mut self, property: Box<dyn Property>) -> Option<Box<dyn Property>> {
        self.properties.insert(property.id(), property)
    }

    pub fn get(&self, id: PropertyId) -> PropertyResult<&dyn Property> {
        self.properties
            .get(&id)
            .map(Box::as_ref)
            .ok_or(PropertyError::Unregistered(id))
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.properties.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.properties.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Check that every declared dependency is registered and that the
    /// dependency graph is acyclic.
    pub fn validate(&self) -> PropertyResult<()> {
        for (id, property) in &self.properties {
            if let Some(missing) = property
                .dependencies()
                .iter()
                .find(|dep| !self.contains(**dep))
            {
                return Err(PropertyError::MissingDependency {
                    property: *id,
                    dependency: *missing,
                });
            }
        }

        let mut done = HashSet::new();
        for id in self.properties.keys() {
            let mut path = Vec::new();
            self.visit(*id, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        id: PropertyId,
        path: &mut Vec<PropertyId>,
        done: &mut HashSet<PropertyId>,
    ) -> PropertyResult<()> {
        if done.contains(&id) {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|p| *p == id) {
            let mut chain = path[pos..].to_vec();
            chain.push(id);
            return Err(PropertyError::DependencyCycle { chain });
        }
        path.push(id);
        if let Some(property) = self.properties.get(&id) {
            for dep in property.dependencies() {
                self.visit(*dep, path, done)?;
            }
        }
        path.pop();
        done.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyEngine, PropertyValue};
    use reconcile::Annotation;
    use reconcile_document::Document;

    struct Declared {
        id: PropertyId,
        deps: &'static [PropertyId],
    }

    impl Property for Declared {
        fn id(&self) -> PropertyId {
            self.id
        }

        fn dependencies(&self) -> &'static [PropertyId] {
            self.deps
        }

        fn produce(
            &self,
            _mention: &Annotation,
            _engine: &mut PropertyEngine,
            _doc: &mut Document,
        ) -> PropertyResult<PropertyValue> {
            Ok(PropertyValue::None)
        }
    }

    #[test]
    fn test_standard_registry_is_complete() {
        let registry = PropertyRegistry::standard().unwrap();
        for id in PropertyId::ALL {
            assert!(registry.contains(id), "{id} missing");
        }
    }

    #[test]
    fn test_dependency_cycle_rejected() {
        let mut registry = PropertyRegistry::empty();
        registry.register(Box::new(Declared {
            id: PropertyId::Gender,
            deps: &[PropertyId::Number],
        }));
        registry.register(Box::new(Declared {
            id: PropertyId::Number,
            deps: &[PropertyId::Animacy],
        }));
        registry.register(Box::new(Declared {
            id: PropertyId::Animacy,
            deps: &[PropertyId::Gender],
        }));
        let err = registry.validate().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"property dependencies form a cycle: Number -> Animacy -> Gender -> Number");
    }

    #[test]
    fn test_missing_dependency_rejected() {
        let mut registry = PropertyRegistry::empty();
        registry.register(Box::new(Declared {
            id: PropertyId::HeadPos,
            deps: &[PropertyId::HeadNoun],
        }));
        assert!(matches!(
            registry.validate(),
            Err(PropertyError::MissingDependency {
                property: PropertyId::HeadPos,
                dependency: PropertyId::HeadNoun,
            })
        ));
    }
}
