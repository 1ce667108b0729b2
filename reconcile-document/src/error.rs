//! Error types for document access.

use reconcile::AnnotationError;
use thiserror::Error;

/// Errors that can occur while loading or persisting document artifacts.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The raw text file exists but is empty.
    #[error("raw text of document '{doc}' is empty")]
    EmptyText { doc: String },

    /// A set required by a computation was never loaded or persisted.
    #[error("document '{doc}' has no annotation set '{name}'")]
    MissingAnnotationSet { doc: String, name: String },

    /// A span does not address valid text.
    #[error("span [{start},{end}) is outside the text of document '{doc}' (length {len})")]
    OffsetOutOfRange {
        doc: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// The document lives only in memory and cannot persist.
    #[error("document '{doc}' has no storage location")]
    NoStorage { doc: String },

    /// Metadata file could not be parsed.
    #[error("bad metadata in '{path}': {message}")]
    Metadata { path: String, message: String },

    /// Reading or writing a file failed.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
