//! Error types for feature generation.

use reconcile::AnnotationError;
use reconcile_document::DocumentError;
use reconcile_properties::PropertyError;
use thiserror::Error;

/// Errors raised while generating, writing or consuming features.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("unknown pair generator '{0}'")]
    UnknownGenerator(String),

    #[error("unknown feature writer '{0}'")]
    UnknownWriter(String),

    #[error("unknown classifier '{0}'")]
    UnknownClassifier(String),

    #[error("unknown clusterer '{0}'")]
    UnknownClusterer(String),

    /// A feature file could not be parsed.
    #[error("{path}:{line}: {message}")]
    Arff {
        path: String,
        line: usize,
        message: String,
    },

    /// A feature table lacks a column a consumer needs.
    #[error("feature table has no attribute '{0}'")]
    MissingAttribute(String),

    /// Scores and instances are out of step.
    #[error("expected {expected} predictions, found {found}")]
    PredictionCount { expected: usize, found: usize },

    #[error("bad prediction '{value}' on line {line}")]
    BadPrediction { line: usize, value: String },

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

impl FeatureError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        move |source| FeatureError::Io { path, source }
    }
}

/// Result type for feature operations.
pub type FeatureResult<T> = Result<T, FeatureError>;
