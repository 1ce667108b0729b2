//! Error types for the pipeline driver.

use reconcile::AnnotationError;
use reconcile_document::DocumentError;
use reconcile_features::FeatureError;
use reconcile_properties::PropertyError;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required parameter is missing or a parameter is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration '{path}': {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

impl PipelineError {
    pub(crate) fn missing(parameter: &str) -> Self {
        PipelineError::Config(format!("missing required parameter '{parameter}'"))
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
