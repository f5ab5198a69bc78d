//! Error taxonomy for traversals.
//!
//! Only two conditions abort a traversal: a failing [`Datasource`](crate::graph::Datasource)
//! call and an exhausted iteration budget. Contradictory settings are rejected before the
//! first vertex is touched. Dangling references are not errors; they are logged and the
//! affected branch simply ends.

use thiserror::Error;

/// Failure reported by a datasource while resolving vertices or enumerating edges.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasourceError {
    /// A vertex the datasource was expected to hold could not be resolved.
    #[error("vertex '{id}' could not be resolved")]
    UnresolvedVertex {
        /// Identifier of the missing vertex.
        id: String,
    },

    /// A collection name does not belong to this datasource.
    #[error("collection '{name}' is not known to this datasource")]
    UnknownCollection {
        /// Name of the collection.
        name: String,
    },

    /// A collection was paired with a source or document that names another collection.
    #[error("expected collection '{expected}', found '{found}'")]
    CollectionMismatch {
        /// Collection the caller asked for.
        expected: String,
        /// Collection actually supplied.
        found: String,
    },

    /// Opaque failure of the backing store (I/O, timeouts, cancellation).
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A traversal configuration that cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// `min_depth` lies beyond `max_depth`, so nothing could ever be visited.
    #[error("min depth {min} exceeds max depth {max}")]
    MinDepthExceedsMaxDepth {
        /// Configured minimum depth.
        min: usize,
        /// Configured maximum depth.
        max: usize,
    },

    /// A label-restricted expander was configured without any labels.
    #[error("label-restricted expander requires at least one label")]
    MissingLabels,

    /// An edge-example list was supplied but it is empty.
    #[error("followEdges must contain at least one example")]
    EmptyFollowEdges,

    /// A vertex-example list was supplied but it is empty.
    #[error("filterVertices must contain at least one example")]
    EmptyFilterVertices,

    /// An option value could not be interpreted.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidOption {
        /// Name of the option.
        option: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Error returned by [`Traverser`](crate::traversal::Traverser) operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraversalError {
    /// The datasource failed; the traversal was aborted.
    #[error("datasource failure: {0}")]
    Datasource(#[from] DatasourceError),

    /// The configuration was rejected before the traversal started.
    #[error("invalid traversal configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The traversal processed more frontier entries than allowed.
    #[error("traversal exceeded the limit of {limit} iterations")]
    TooManyIterations {
        /// The configured iteration budget.
        limit: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = TraversalError> = core::result::Result<T, E>;
