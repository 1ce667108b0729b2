//! Lazily computed, memoized properties of noun-phrase mentions.
//!
//! A [`Property`] computes one value (head noun, gender, sentence number, ...)
//! for a mention of a [`Document`](reconcile_document::Document). The
//! [`PropertyEngine`] owns the per-document cache: every cached value is
//! computed at most once and later requests get the same `Arc`.
//!
//! ```ignore
//! use std::sync::Arc;
//! use reconcile_properties::{PropertyEngine, PropertyId, PropertyRegistry};
//!
//! let registry = Arc::new(PropertyRegistry::standard()?);
//! let mut engine = PropertyEngine::new(registry);
//! let head = engine.span(PropertyId::HeadNoun, &mention, &mut doc)?;
//! engine.reset(); // next document
//! ```
//!
//! ## Dependencies
//!
//! Properties declare the properties they read. The registry rejects a
//! declared cycle at construction, and the engine rejects a cycle that only
//! shows up at run time with [`PropertyError::Cycle`].
//!
//! ## Whole-document properties
//!
//! `MaximalNP`, `SentNum`, `ParNum`, `CorefID` and the quote properties are
//! cheaper to compute for every mention at once. Under
//! [`BatchPolicy::OnFirstUse`] the first request runs the batch over the `nps`
//! set; under [`BatchPolicy::Explicit`] only
//! [`PropertyEngine::precompute_all`] does.

mod engine;
mod error;
pub mod lexicon;
pub mod properties;
mod property;
mod registry;
mod value;

pub use engine::{BatchPolicy, PropertyEngine};
pub use error::{PropertyError, PropertyResult};
pub use property::{Computed, Property, PropertyId};
pub use registry::PropertyRegistry;
pub use value::{Animacy, Gender, GramRole, Number, Person, PronounType, PropertyValue, SemClass};
