//! Error types for spans, interval indexes and the bytespan codec.

use thiserror::Error;

use crate::AnnotationId;

/// Errors raised while building or persisting annotation sets.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// A span was constructed with `start > end`.
    #[error("invalid span: start {start} is after end {end}")]
    InvalidSpan { start: usize, end: usize },

    /// The set rejects crossing spans and the added span crosses an existing one.
    #[error("span {kind}[{start},{end}) crosses existing span {other_kind}[{other_start},{other_end}) (id {other_id})")]
    Crossing {
        kind: String,
        start: usize,
        end: usize,
        other_kind: String,
        other_start: usize,
        other_end: usize,
        other_id: AnnotationId,
    },

    /// No positive id is left to assign.
    #[error("annotation ids exhausted in set '{set}'")]
    IdsExhausted { set: String },

    /// Reading or writing a persisted set failed.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for annotation operations.
pub type AnnotationResult<T> = Result<T, AnnotationError>;
