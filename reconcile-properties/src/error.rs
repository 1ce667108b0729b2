//! Error types for property computation.

use reconcile::SpanKey;
use reconcile_document::DocumentError;
use thiserror::Error;

use crate::PropertyId;

/// Errors raised while computing or registering properties.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// A property re-entered its own computation for the same mention.
    #[error("cyclic computation of {property} for span [{},{})", .span.start, .span.end)]
    Cycle { property: PropertyId, span: SpanKey },

    /// A whole-document computation was re-entered while running.
    #[error("cyclic batch computation of {property}")]
    BatchCycle { property: PropertyId },

    /// Declared dependencies form a cycle.
    #[error("property dependencies form a cycle: {}", format_chain(.chain))]
    DependencyCycle { chain: Vec<PropertyId> },

    /// A declared dependency has no registered implementation.
    #[error("{property} depends on unregistered {dependency}")]
    MissingDependency {
        property: PropertyId,
        dependency: PropertyId,
    },

    #[error("no implementation registered for {0}")]
    Unregistered(PropertyId),

    /// A stored value does not have the shape its consumer expects.
    #[error("{property} produced {found}, expected {expected}")]
    TypeMismatch {
        property: PropertyId,
        expected: &'static str,
        found: &'static str,
    },

    /// Required text or annotation sets are unavailable.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

fn format_chain(chain: &[PropertyId]) -> String {
    chain
        .iter()
        .map(|id| id.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for property computation.
pub type PropertyResult<T> = Result<T, PropertyError>;
