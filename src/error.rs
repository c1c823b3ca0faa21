use thiserror::Error;

/// Top-level error type for the waygraph navigation kernel.
#[derive(Debug, Error)]
pub enum WaygraphError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors related to the authored vertex/edge topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("edge references a removed vertex")]
    DanglingEdge,
}

/// Recoverable failures reported by graph queries.
///
/// These are ordinary outcomes callers branch on, not misuse: a target in
/// another connected component, or a query point from which every vertex
/// is obstructed.
#[derive(Debug)]
pub enum QueryError {
    NoPath { source: usize, target: usize },

    NoVisibleVertex,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPath { source, target } => {
                write!(f, "no path from vertex {source} to vertex {target}")
            }
            Self::NoVisibleVertex => f.write_str("no vertex is visible from the query position"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Convenience type alias for results using [`WaygraphError`].
pub type Result<T> = std::result::Result<T, WaygraphError>;
