//! Mention pairs, pairwise features and feature files for Reconcile.
//!
//! Extraction drains a [`PairGenerator`] over a document's mentions and runs a
//! configured [`FeatureSet`] on every pair. Rows are written by a
//! [`FeatureWriter`]; a [`Classifier`] scores the rows read back from the
//! feature file and a [`Clusterer`] turns the scores into chains.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reconcile_document::Document;
//! use reconcile_features::{extract, pair_generator, FeatureContext, FeatureRegistry};
//! use reconcile_properties::{PropertyEngine, PropertyRegistry};
//!
//! let mut doc = Document::open("corpus/doc1");
//! let mut engine = PropertyEngine::new(Arc::new(PropertyRegistry::standard().unwrap()));
//! let features = FeatureRegistry::standard().build(&["SoonStr", "class"]).unwrap();
//! let mut generator = pair_generator("Soon", None).unwrap();
//! let mut ctx = FeatureContext::new(&mut doc, &mut engine, true);
//! let instances = extract(generator.as_mut(), &features, &mut ctx).unwrap();
//! println!("{} instances", instances.len());
//! ```

mod arff;
mod classifier;
mod cluster;
mod context;
mod error;
mod extract;
mod feature;
pub mod features;
mod pairs;
mod registry;
mod value;

pub use arff::{
    feature_writer, parse_arff, read_arff, write_feature_file, Attribute, AttributeKind,
    BinarizedArffWriter, FeatureTable, FeatureWriter, PlainArffWriter, CLASS_ATTRIBUTE,
};
pub use classifier::{
    classifier_by_name, read_predictions, write_predictions, Classifier,
    PredictionFileClassifier, SoonStrBaseline,
};
pub use cluster::{clusterer_by_name, BestFirst, Clusterer, SingleLink, DEFAULT_THRESHOLD};
pub use context::FeatureContext;
pub use error::{FeatureError, FeatureResult};
pub use extract::{attach_doc_no, extract, Instances};
pub use feature::{Feature, FeatureSet};
pub use pairs::{pair_generator, AllPairs, PairGenerator, Pairs, Soon, Windowed};
pub use registry::FeatureRegistry;
pub use value::{
    FeatureKind, FeatureRow, FeatureValue, COMPATIBLE, INCOMPATIBLE, NO, NOT_APPLICABLE, YES,
};
