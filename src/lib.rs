#![doc(
    html_logo_url = "https://raw.githubusercontent.com/reconcile-nlp/reconcile/main/assets/reconcile.svg",
    issue_tracker_base_url = "https://github.com/reconcile-nlp/reconcile/issues/"
)]

//! Annotation spans and interval indexes for Reconcile.
//!
//! A document is represented as raw text plus named collections of typed,
//! offset-addressed spans. This crate provides the two building blocks and
//! their on-disk format:
//!
//! - [`Annotation`] - a typed `[start, end)` span with string attributes
//! - [`AnnotationSet`] - a named interval index with overlap, containment and
//!   crossing queries
//! - [`bytespan`] - the tab-separated annotation file format
//! - [`AnnotationSetDisplay`] - underline rendering for debugging and snapshots
//!
//! ## Example
//!
//! ```
//! use reconcile::AnnotationSet;
//!
//! let mut nps = AnnotationSet::new("nps");
//! nps.add_span(0, 5, "NP").unwrap();
//! nps.add_span(6, 10, "NP").unwrap();
//! nps.add_span(0, 10, "NP").unwrap();
//!
//! assert_eq!(nps.contained(0, 10).unwrap().len(), 3);
//! assert_eq!(nps.contained(1, 10).unwrap().len(), 1);
//! ```

mod annotation;
pub mod bytespan;
mod error;

pub use annotation::{
    Annotation, AnnotationId, AnnotationSet, AnnotationSetDisplay, Features, SpanKey,
};
pub use error::{AnnotationError, AnnotationResult};
