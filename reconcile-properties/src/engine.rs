//! Memoizing evaluation of properties over one document.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use reconcile::{Annotation, SpanKey};
use reconcile_document::{names, Document};
use tracing::{debug, trace};

use crate::value::{Animacy, Gender, GramRole, Number, Person, PronounType, SemClass};
use crate::{PropertyError, PropertyId, PropertyRegistry, PropertyResult, PropertyValue};

/// When whole-document properties run their batch computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// The first request for a whole-document property computes it for every
    /// mention of the document.
    #[default]
    OnFirstUse,
    /// Only [`PropertyEngine::precompute_all`] runs batches.
    Explicit,
}

/// Per-document cache arena for property values.
///
/// Values are keyed by property and mention. A cached value is computed at
/// most once per document and handed out as the same `Arc` on every hit.
/// Call [`reset`](Self::reset) before moving to the next document.
#[derive(Debug)]
pub struct PropertyEngine {
    registry: Arc<PropertyRegistry>,
    policy: BatchPolicy,
    cache: HashMap<(PropertyId, SpanKey), Arc<PropertyValue>>,
    in_progress: Vec<(PropertyId, SpanKey)>,
    batching: Vec<PropertyId>,
    batched: HashSet<PropertyId>,
}

macro_rules! typed_value {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(
            &mut self,
            id: PropertyId,
            mention: &Annotation,
            doc: &mut Document,
        ) -> PropertyResult<$ty> {
            match &*self.value(id, mention, doc)? {
                PropertyValue::$variant(value) => Ok(*value),
                other => Err(mismatch(id, stringify!($variant), other)),
            }
        }
    };
}

impl PropertyEngine {
    pub fn new(registry: Arc<PropertyRegistry>) -> Self {
        Self {
            registry,
            policy: BatchPolicy::default(),
            cache: HashMap::new(),
            in_progress: Vec::new(),
            batching: Vec::new(),
            batched: HashSet::new(),
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Drop every cached value.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.in_progress.clear();
        self.batching.clear();
        self.batched.clear();
    }

    /// Number of cached values.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// The cached value, without computing anything.
    pub fn cached(&self, id: PropertyId, mention: &Annotation) -> Option<Arc<PropertyValue>> {
        self.cache.get(&(id, mention.key())).cloned()
    }

    /// Value of property `id` for `mention`, computing and caching it on a miss.
    pub fn value(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Arc<PropertyValue>> {
        let key = (id, mention.key());
        if let Some(value) = self.cache.get(&key) {
            return Ok(Arc::clone(value));
        }

        let registry = Arc::clone(&self.registry);
        let property = registry.get(id)?;

        if property.whole_document()
            && self.policy == BatchPolicy::OnFirstUse
            && !self.batched.contains(&id)
            && !self.batching.contains(&id)
        {
            self.precompute_all(id, doc)?;
            if let Some(value) = self.cache.get(&key) {
                return Ok(Arc::clone(value));
            }
        }

        if self.in_progress.contains(&key) {
            return Err(PropertyError::Cycle {
                property: id,
                span: key.1,
            });
        }
        self.in_progress.push(key);
        let produced = property.produce(mention, self, doc);
        self.in_progress.pop();

        let value = Arc::new(produced?);
        trace!(property = %id, start = mention.start(), end = mention.end(), "computed property");
        if property.cached() {
            self.cache.insert(key, Arc::clone(&value));
        }
        Ok(value)
    }

    /// Run the whole-document computation of `id` over the `nps` set.
    ///
    /// Every value the batch yields is stored, including values of other
    /// properties; values already cached are kept. Returns the number of
    /// values stored.
    pub fn precompute_all(&mut self, id: PropertyId, doc: &mut Document) -> PropertyResult<usize> {
        if self.batching.contains(&id) {
            return Err(PropertyError::BatchCycle { property: id });
        }
        let registry = Arc::clone(&self.registry);
        let property = registry.get(id)?;
        let mentions = doc.require_set(names::NPS)?;

        self.batching.push(id);
        let produced = property.produce_all(&mentions, self, doc);
        self.batching.pop();

        let produced = produced?;
        self.batched.insert(id);
        let mut stored = 0;
        for entry in produced {
            self.batched.insert(entry.property);
            if !registry.get(entry.property)?.cached() {
                continue;
            }
            if let Entry::Vacant(slot) = self.cache.entry((entry.property, entry.key)) {
                slot.insert(Arc::new(entry.value));
                stored += 1;
            }
        }
        debug!(doc = %doc.id(), property = %id, mentions = mentions.len(), stored, "precomputed property");
        Ok(stored)
    }

    // ========================================================================
    // Typed access
    // ========================================================================

    /// A boolean property; a property that does not apply reads as `false`.
    pub fn flag(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<bool> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Bool(value) => Ok(*value),
            PropertyValue::None => Ok(false),
            other => Err(mismatch(id, "bool", other)),
        }
    }

    pub fn int(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Option<i64>> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Int(value) => Ok(Some(*value)),
            PropertyValue::None => Ok(None),
            other => Err(mismatch(id, "int", other)),
        }
    }

    pub fn text(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Option<String>> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Text(value) => Ok(Some(value.clone())),
            PropertyValue::None => Ok(None),
            other => Err(mismatch(id, "text", other)),
        }
    }

    pub fn span(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Option<Annotation>> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Span(value) => Ok(Some(value.clone())),
            PropertyValue::None => Ok(None),
            other => Err(mismatch(id, "span", other)),
        }
    }

    pub fn spans(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Vec<Annotation>> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Spans(value) => Ok(value.clone()),
            PropertyValue::None => Ok(Vec::new()),
            other => Err(mismatch(id, "spans", other)),
        }
    }

    pub fn person(
        &mut self,
        id: PropertyId,
        mention: &Annotation,
        doc: &mut Document,
    ) -> PropertyResult<Option<Person>> {
        match &*self.value(id, mention, doc)? {
            PropertyValue::Person(value) => Ok(Some(*value)),
            PropertyValue::None => Ok(None),
            other => Err(mismatch(id, "person", other)),
        }
    }

    typed_value!(number, Number, Number);
    typed_value!(gender, Gender, Gender);
    typed_value!(animacy, Animacy, Animacy);
    typed_value!(gram_role, GramRole, GramRole);
    typed_value!(pronoun, Pronoun, PronounType);
    typed_value!(
        /// A semantic class property.
        sem_class,
        SemClass,
        SemClass
    );
}

fn mismatch(property: PropertyId, expected: &'static str, found: &PropertyValue) -> PropertyError {
    PropertyError::TypeMismatch {
        property,
        expected,
        found: found.shape(),
    }
}
