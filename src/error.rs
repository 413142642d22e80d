//! Error types for graph construction, priority queue misuse and plan setup.

/// Errors raised by the routing library.
///
/// Rejected swaps (capacity or pinning) are not errors: the optimizer skips
/// them silently and keeps searching.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("vertex count must be positive, got {0}")]
    InvalidVertexCount(usize),

    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    #[error("edge {start}->{end} has invalid weight {weight}")]
    InvalidWeight { start: usize, end: usize, weight: f64 },

    #[error("index {index} is out of range for a priority queue of capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("index {0} is already in the priority queue")]
    DuplicateIndex(usize),

    #[error("index {0} is not in the priority queue")]
    MissingIndex(usize),

    #[error("route {route} is out of range for a fleet of {routes} routes")]
    RouteOutOfRange { route: usize, routes: usize },

    #[error("stop {stop} is already pinned to route {pinned}, cannot pin it to route {requested}")]
    ConflictingConstraint {
        stop: usize,
        pinned: usize,
        requested: usize,
    },

    #[error("route {route} holds {load} demand units, exceeding its capacity of {capacity}")]
    CapacityExceeded {
        route: usize,
        load: usize,
        capacity: usize,
    },

    #[error("no path from vertex {from} to vertex {to}")]
    Unreachable { from: usize, to: usize },
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
