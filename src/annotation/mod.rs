//! Offset-addressed spans over document text.
//!
//! An [`Annotation`] is a half-open `[start, end)` interval of byte offsets
//! into a document's raw text, tagged with a type (`kind`) and an ordered map
//! of string attributes. Annotations are owned by an [`AnnotationSet`], which
//! assigns their ids.

mod display;
mod set;

pub use display::AnnotationSetDisplay;
pub use set::AnnotationSet;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AnnotationError, AnnotationResult};

/// Identity of an annotation, unique only within its owning set.
pub type AnnotationId = u32;

/// Ordered attribute map attached to every annotation.
pub type Features = BTreeMap<String, String>;

/// Compact key identifying an annotation inside one document.
///
/// Ids alone are only unique per set, so the offsets travel along to keep keys
/// from different sets apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanKey {
    pub id: AnnotationId,
    pub start: usize,
    pub end: usize,
}

/// A typed interval over document text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    id: AnnotationId,
    start: usize,
    end: usize,
    kind: String,
    features: Features,
}

impl Annotation {
    /// Create an annotation with no attributes.
    pub fn new(
        id: AnnotationId,
        start: usize,
        end: usize,
        kind: impl Into<String>,
    ) -> AnnotationResult<Self> {
        Self::with_features(id, start, end, kind, Features::new())
    }

    /// Create an annotation carrying the given attributes.
    pub fn with_features(
        id: AnnotationId,
        start: usize,
        end: usize,
        kind: impl Into<String>,
        features: Features,
    ) -> AnnotationResult<Self> {
        if start > end {
            return Err(AnnotationError::InvalidSpan { start, end });
        }
        Ok(Self {
            id,
            start,
            end,
            kind: kind.into(),
            features,
        })
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: AnnotationId) {
        self.id = id;
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Width of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Zero-width spans are legal.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn key(&self) -> SpanKey {
        SpanKey {
            id: self.id,
            start: self.start,
            end: self.end,
        }
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Get a string attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.features.get(name).map(String::as_str)
    }

    /// Set a string attribute, returning the previous value.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.features.insert(name.into(), value.into())
    }

    /// Remove a string attribute, returning its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.features.remove(name)
    }

    /// True iff the half-open ranges share at least one position.
    ///
    /// A malformed query (`start > end`) never overlaps.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start > end {
            return false;
        }
        !(end <= self.start || start >= self.end)
    }

    pub fn overlaps_span(&self, other: &Annotation) -> bool {
        self.overlaps(other.start, other.end)
    }

    /// True iff `[start, end)` lies within this span.
    pub fn covers(&self, start: usize, end: usize) -> bool {
        if start > end {
            return false;
        }
        self.start <= start && end <= self.end
    }

    pub fn covers_span(&self, other: &Annotation) -> bool {
        self.covers(other.start, other.end)
    }

    /// [`covers`](Self::covers) with at least one strict boundary.
    pub fn proper_covers(&self, start: usize, end: usize) -> bool {
        self.covers(start, end) && (self.start < start || end < self.end)
    }

    pub fn proper_covers_span(&self, other: &Annotation) -> bool {
        self.proper_covers(other.start, other.end)
    }

    /// True iff the spans overlap and neither covers the other.
    pub fn crosses(&self, other: &Annotation) -> bool {
        self.overlaps_span(other) && !self.covers_span(other) && !other.covers_span(self)
    }

    /// Natural order on `(start, end)` only.
    pub fn compare_span(&self, other: &Annotation) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }

    /// The smallest annotation starting at `start` under the tie-break order.
    pub(crate) fn range_floor(start: usize) -> Self {
        Self {
            id: 0,
            start,
            end: start,
            kind: String::new(),
            features: Features::new(),
        }
    }
}

impl Ord for Annotation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_span(other)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.features.len().cmp(&other.features.len()))
            .then_with(|| self.features.cmp(&other.features))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Annotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{},{})#{}", self.kind, self.start, self.end, self.id)?;
        if !self.features.is_empty() {
            f.write_str(" {")?;
            for (idx, (name, value)) in self.features.iter().enumerate() {
                if idx > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}={:?}", name, value)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}
