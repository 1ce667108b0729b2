//! Named interval index over annotations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Annotation, AnnotationId, Features};
use crate::error::{AnnotationError, AnnotationResult};

/// A named collection of annotations supporting overlap and containment queries.
///
/// Iteration always follows the tie-break order of [`Annotation`] (start, end,
/// kind, attributes, id), so two sets holding the same spans iterate the same
/// way regardless of insertion order. Queries return new sets that keep the
/// ids of the matched annotations; the receiver is never mutated by a query.
#[derive(Debug, Clone)]
pub struct AnnotationSet {
    name: String,
    by_id: HashMap<AnnotationId, Annotation>,
    ordered: BTreeSet<Annotation>,
    kind_counts: BTreeMap<String, usize>,
    /// Every id in `1..next_free` is in use.
    next_free: AnnotationId,
    /// Upper bound on span length, used to bound backward scans.
    max_len: usize,
    reject_crossing: bool,
}

impl AnnotationSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            by_id: HashMap::new(),
            ordered: BTreeSet::new(),
            kind_counts: BTreeMap::new(),
            next_free: 1,
            max_len: 0,
            reject_crossing: false,
        }
    }

    /// Make later additions fail when they cross an existing span.
    pub fn rejecting_crossing(mut self) -> Self {
        self.reject_crossing = true;
        self
    }

    pub fn set_reject_crossing(&mut self, reject: bool) {
        self.reject_crossing = reject;
    }

    pub fn rejects_crossing(&self) -> bool {
        self.reject_crossing
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterate in tie-break order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> + '_ {
        self.ordered.iter()
    }

    pub fn to_vec(&self) -> Vec<Annotation> {
        self.ordered.iter().cloned().collect()
    }

    pub fn by_id(&self, id: AnnotationId) -> Option<&Annotation> {
        self.by_id.get(&id)
    }

    pub fn contains_id(&self, id: AnnotationId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Structural membership test.
    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.ordered.contains(annotation)
    }

    /// Number of spans of the given type.
    pub fn kind_count(&self, kind: &str) -> usize {
        self.kind_counts.get(kind).copied().unwrap_or(0)
    }

    /// Types present in the set, alphabetically.
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.kind_counts.keys().map(String::as_str)
    }

    pub fn first(&self) -> Option<&Annotation> {
        self.ordered.iter().next()
    }

    pub fn last(&self) -> Option<&Annotation> {
        self.ordered.iter().next_back()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a span with a freshly assigned id.
    pub fn add_span(
        &mut self,
        start: usize,
        end: usize,
        kind: impl Into<String>,
    ) -> AnnotationResult<AnnotationId> {
        self.add_span_with_features(start, end, kind, Features::new())
    }

    /// Add a span with attributes and a freshly assigned id.
    ///
    /// The id is the smallest positive integer not currently in use.
    pub fn add_span_with_features(
        &mut self,
        start: usize,
        end: usize,
        kind: impl Into<String>,
        features: Features,
    ) -> AnnotationResult<AnnotationId> {
        let id = self.next_id()?;
        let annotation = Annotation::with_features(id, start, end, kind, features)?;
        self.insert(annotation)?;
        Ok(id)
    }

    /// Add a copy of `annotation`, reassigning its id on collision.
    ///
    /// Returns whether the set changed.
    pub fn add(&mut self, annotation: &Annotation) -> AnnotationResult<bool> {
        let mut copy = annotation.clone();
        if self.by_id.contains_key(&copy.id) {
            copy.set_id(self.next_id()?);
        }
        self.insert(copy)
    }

    /// Add a copy of `annotation` keeping its id, replacing any prior holder of that id.
    pub fn add_keep_id(&mut self, annotation: &Annotation) -> AnnotationResult<bool> {
        self.add_ref(annotation.clone())
    }

    /// Move `annotation` into the set keeping its id, replacing any prior holder of that id.
    pub fn add_ref(&mut self, annotation: Annotation) -> AnnotationResult<bool> {
        if self.reject_crossing {
            self.check_crossing(&annotation)?;
        }
        let previous = self.remove_id(annotation.id);
        self.insert(annotation).or_else(|err| {
            if let Some(previous) = previous {
                self.insert(previous)?;
            }
            Err(err)
        })
    }

    /// Add every annotation of `other`, reassigning ids on collision.
    pub fn add_all(&mut self, other: &AnnotationSet) -> AnnotationResult<()> {
        for annotation in other.iter() {
            self.add(annotation)?;
        }
        Ok(())
    }

    /// Remove the structurally equal annotation, if any.
    pub fn remove(&mut self, annotation: &Annotation) -> bool {
        if !self.ordered.contains(annotation) {
            return false;
        }
        self.remove_id(annotation.id).is_some()
    }

    /// Remove the annotation holding `id`.
    pub fn remove_id(&mut self, id: AnnotationId) -> Option<Annotation> {
        let removed = self.by_id.remove(&id)?;
        self.ordered.remove(&removed);
        if let Some(count) = self.kind_counts.get_mut(removed.kind()) {
            *count -= 1;
            if *count == 0 {
                self.kind_counts.remove(removed.kind());
            }
        }
        if id > 0 && id < self.next_free {
            self.next_free = id;
        }
        Some(removed)
    }

    /// Replace the stored annotation that has the same id as `updated`.
    ///
    /// Used to change attributes in place; offsets may change too.
    pub fn update(&mut self, updated: Annotation) -> AnnotationResult<bool> {
        self.add_ref(updated)
    }

    fn next_id(&mut self) -> AnnotationResult<AnnotationId> {
        let mut candidate = self.next_free.max(1);
        while self.by_id.contains_key(&candidate) {
            candidate = candidate
                .checked_add(1)
                .ok_or_else(|| AnnotationError::IdsExhausted {
                    set: self.name.clone(),
                })?;
        }
        self.next_free = candidate;
        Ok(candidate)
    }

    /// Fails on any crossing span other than the holder of the same id, which
    /// a keep-id add replaces.
    fn check_crossing(&self, annotation: &Annotation) -> AnnotationResult<()> {
        let from = annotation.start().saturating_sub(self.max_len);
        let conflict = self
            .starting_from(from)
            .take_while(|a| a.start() < annotation.end())
            .find(|a| a.id != annotation.id && a.crosses(annotation));
        match conflict {
            Some(other) => Err(AnnotationError::Crossing {
                kind: annotation.kind().to_string(),
                start: annotation.start(),
                end: annotation.end(),
                other_kind: other.kind().to_string(),
                other_start: other.start(),
                other_end: other.end(),
                other_id: other.id(),
            }),
            _ => Ok(()),
        }
    }

    fn insert(&mut self, annotation: Annotation) -> AnnotationResult<bool> {
        if self.reject_crossing {
            self.check_crossing(&annotation)?;
        }
        self.max_len = self.max_len.max(annotation.len());
        *self
            .kind_counts
            .entry(annotation.kind().to_string())
            .or_insert(0) += 1;
        self.by_id.insert(annotation.id, annotation.clone());
        Ok(self.ordered.insert(annotation))
    }

    /// Build a query result carrying the matched annotations with their ids.
    fn derive<'a>(&self, matches: impl Iterator<Item = &'a Annotation>) -> AnnotationSet {
        let mut result = AnnotationSet::new(self.name.clone());
        for annotation in matches {
            result.max_len = result.max_len.max(annotation.len());
            *result
                .kind_counts
                .entry(annotation.kind().to_string())
                .or_insert(0) += 1;
            result.by_id.insert(annotation.id, annotation.clone());
            result.ordered.insert(annotation.clone());
        }
        result
    }

    /// Annotations starting at or after `start`, in order.
    fn starting_from(&self, start: usize) -> impl Iterator<Item = &Annotation> + '_ {
        self.ordered.range(Annotation::range_floor(start)..)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Spans of the given type.
    ///
    /// Returns `None` when the set is empty and also when nothing matched.
    pub fn get(&self, kind: &str) -> Option<AnnotationSet> {
        self.get_any(&[kind])
    }

    /// Spans whose type is any of `kinds`; `None` when empty or nothing matched.
    pub fn get_any(&self, kinds: &[&str]) -> Option<AnnotationSet> {
        if self.is_empty() {
            return None;
        }
        if !kinds.iter().any(|kind| self.kind_count(kind) > 0) {
            return None;
        }
        Some(self.derive(self.iter().filter(|a| kinds.contains(&a.kind()))))
    }

    /// Spans sharing at least one position with `[start, end)`.
    pub fn overlapping(&self, start: usize, end: usize) -> AnnotationSet {
        if start > end {
            return AnnotationSet::new(self.name.clone());
        }
        let from = start.saturating_sub(self.max_len);
        self.derive(
            self.starting_from(from)
                .take_while(|a| a.start() < end)
                .filter(|a| a.overlaps(start, end)),
        )
    }

    pub fn overlapping_span(&self, span: &Annotation) -> AnnotationSet {
        self.overlapping(span.start(), span.end())
    }

    /// Spans lying within `[start, end]`: `start <= s.start && s.end <= end`.
    ///
    /// Returns `None` for an inverted query range.
    pub fn contained(&self, start: usize, end: usize) -> Option<AnnotationSet> {
        if start > end {
            return None;
        }
        Some(
            self.derive(
                self.starting_from(start)
                    .take_while(|a| a.start() <= end)
                    .filter(|a| a.end() <= end),
            ),
        )
    }

    pub fn contained_span(&self, span: &Annotation) -> Option<AnnotationSet> {
        self.contained(span.start(), span.end())
    }

    /// Spans covering `[start, end)`.
    pub fn covering(&self, start: usize, end: usize) -> AnnotationSet {
        if start > end {
            return AnnotationSet::new(self.name.clone());
        }
        let from = start.saturating_sub(self.max_len);
        self.derive(
            self.starting_from(from)
                .take_while(|a| a.start() <= start)
                .filter(|a| a.end() >= end),
        )
    }

    pub fn covering_span(&self, span: &Annotation) -> AnnotationSet {
        self.covering(span.start(), span.end())
    }

    /// Spans with exactly these offsets.
    pub fn exact(&self, start: usize, end: usize) -> AnnotationSet {
        self.derive(
            self.starting_from(start)
                .take_while(|a| a.start() == start)
                .filter(|a| a.end() == end),
        )
    }

    /// One span that overlaps `span` without either containing the other.
    pub fn crossing(&self, span: &Annotation) -> Option<&Annotation> {
        let from = span.start().saturating_sub(self.max_len);
        self.starting_from(from)
            .take_while(|a| a.start() < span.end())
            .find(|a| a.crosses(span))
    }

    /// Spans whose attribute `name` equals `value`.
    pub fn by_feature(&self, name: &str, value: &str) -> AnnotationSet {
        self.derive(self.iter().filter(|a| a.attribute(name) == Some(value)))
    }

    /// Position of a span in iteration order.
    pub fn position(&self, annotation: &Annotation) -> Option<usize> {
        if !self.ordered.contains(annotation) {
            return None;
        }
        Some(self.ordered.range(..annotation.clone()).count())
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Annotation;
    type IntoIter = std::collections::btree_set::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
