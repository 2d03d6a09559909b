use thiserror::Error;

use crate::clash::{ClashSet, ElementId};

/// Top-level error type for the geometry kernel.
#[derive(Debug, Error)]
pub enum GeoclashError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Errors related to the solid store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to CAD operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`GeoclashError`].
pub type Result<T> = std::result::Result<T, GeoclashError>;

/// Errors surfaced by clash detection.
#[derive(Debug, Error)]
pub enum ClashError {
    #[error("element {0} is not in the model")]
    UnknownElement(ElementId),

    /// The time budget ran out. `partial` holds the clashes found so far.
    #[error("clash detection stopped after {settled} of {pairs} pairs")]
    DetectionIncomplete {
        settled: usize,
        pairs: usize,
        partial: ClashSet,
    },
}

/// Errors reported by a selection sink.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("selection target unavailable")]
    Unavailable,
}
