//! Static weighted digraph stored as adjacency lists.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed, weighted edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub start: usize,
    pub end: usize,
    pub weight: f64,
}

impl DirectedEdge {
    /// Create a new edge.
    pub fn new(start: usize, end: usize, weight: f64) -> Self {
        DirectedEdge { start, end, weight }
    }

    /// The same edge with its direction flipped.
    pub fn reversed(&self) -> Self {
        DirectedEdge::new(self.end, self.start, self.weight)
    }
}

impl fmt::Display for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} {}", self.start, self.end, self.weight)
    }
}

/// A graph of `V` vertices with directed, nonnegatively weighted edges.
///
/// Vertices are dense ids in `[0, V)`. Edges can be added but never removed;
/// shortest path structures built from the graph do not observe later edits.
#[derive(Debug, Clone)]
pub struct WeightedDigraph {
    adjacency: Vec<Vec<DirectedEdge>>,
    edge_count: usize,
}

impl WeightedDigraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count < 1 {
            return Err(Error::InvalidVertexCount(vertex_count));
        }

        Ok(WeightedDigraph {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Append an edge to the adjacency list of its start vertex.
    pub fn add_edge(&mut self, edge: DirectedEdge) -> Result<()> {
        self.check_vertex(edge.start)?;
        self.check_vertex(edge.end)?;

        if edge.weight.is_nan() || edge.weight < 0.0 {
            return Err(Error::InvalidWeight {
                start: edge.start,
                end: edge.end,
                weight: edge.weight,
            });
        }

        self.adjacency[edge.start].push(edge);
        self.edge_count += 1;
        Ok(())
    }

    /// Add a road usable in both directions as two opposite edges.
    pub fn add_undirected_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        let edge = DirectedEdge::new(u, v, weight);
        self.add_edge(edge)?;
        self.add_edge(edge.reversed())
    }

    /// Outgoing edges of vertex `v`.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex of the graph.
    pub fn adjacency(&self, v: usize) -> &[DirectedEdge] {
        &self.adjacency[v]
    }

    /// All edges, grouped by start vertex.
    pub fn edges(&self) -> Vec<DirectedEdge> {
        self.adjacency.iter().flatten().copied().collect()
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.vertex_count() {
            return Err(Error::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            });
        }
        Ok(())
    }
}

