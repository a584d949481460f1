//! Error types for designer operations.

use thiserror::Error;

/// Result type for designer operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors that can occur while managing objects or deriving a schema.
///
/// Export failures ([`DesignError::MissingRoot`], [`DesignError::CycleDetected`],
/// [`DesignError::DepthLimitExceeded`]) abort the whole export; no partial
/// schema is ever returned alongside them.
#[derive(Debug, Error)]
pub enum DesignError {
    /// No object carries the root-frame flag.
    #[error("Root frame not found: no object is flagged as the canvas root")]
    MissingRoot,

    /// The tree walk reached an object it had already visited.
    #[error("Cycle detected in object hierarchy at {0}")]
    CycleDetected(String),

    /// The tree walk went deeper than the configured limit.
    #[error("Object hierarchy exceeds maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// Object not found in the table.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// An object with the same handle is already in the table.
    #[error("Duplicate object handle: {0}")]
    DuplicateObject(String),

    /// A rename was rejected because another object already holds the name.
    #[error("Name already taken: {0}")]
    NameTaken(String),

    /// Snapshot document written by an unknown format revision.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// Snapshot or schema serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
