//! Dijkstra's shortest paths, single-source and all-pairs.
//!
//! Both structures answer queries from arrays filled once at construction.
//! They hold no reference to the graph, so edits made to the graph afterwards
//! are never observed.

use crate::error::{Error, Result};
use crate::graph::{DirectedEdge, WeightedDigraph};
use crate::index_min_pq::IndexMinPQ;

/// Shortest paths from one source vertex to every vertex of a graph.
///
/// Runs in O(E log V) time and uses space proportional to V.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    source: usize,
    dist_to: Vec<f64>,
    edge_to: Vec<Option<DirectedEdge>>,
}

impl Dijkstra {
    /// Compute shortest paths from `source`.
    pub fn new(graph: &WeightedDigraph, source: usize) -> Result<Self> {
        let vertex_count = graph.vertex_count();
        if source >= vertex_count {
            return Err(Error::VertexOutOfRange {
                vertex: source,
                vertex_count,
            });
        }

        let mut search = Dijkstra {
            source,
            dist_to: vec![f64::INFINITY; vertex_count],
            edge_to: vec![None; vertex_count],
        };
        search.dist_to[source] = 0.0;

        let mut pq = IndexMinPQ::new(vertex_count);
        pq.insert(source, 0.0)?;

        while let Some(v) = pq.del_min() {
            search.relax(graph, v, &mut pq)?;
        }

        Ok(search)
    }

    fn relax(&mut self, graph: &WeightedDigraph, v: usize, pq: &mut IndexMinPQ<f64>) -> Result<()> {
        for edge in graph.adjacency(v) {
            let w = edge.end;
            let candidate = self.dist_to[v] + edge.weight;

            if candidate < self.dist_to[w] {
                self.dist_to[w] = candidate;
                self.edge_to[w] = Some(*edge);

                if pq.contains(w) {
                    pq.change_key(w, candidate)?;
                } else {
                    pq.insert(w, candidate)?;
                }
            }
        }
        Ok(())
    }

    /// The source vertex.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source to `v`, or `None` if unreachable.
    pub fn dist(&self, v: usize) -> Option<f64> {
        self.dist_to.get(v).copied().filter(|d| d.is_finite())
    }

    /// Check if `v` is reachable from the source.
    pub fn has_path(&self, v: usize) -> bool {
        self.dist(v).is_some()
    }

    /// Edges of a shortest path from the source to `v`, in travel order.
    ///
    /// Returns `None` if `v` is unreachable. The path to the source itself is
    /// empty.
    pub fn path(&self, v: usize) -> Option<Vec<DirectedEdge>> {
        if !self.has_path(v) {
            return None;
        }

        let mut path = Vec::new();
        let mut edge = self.edge_to[v];
        while let Some(e) = edge {
            path.push(e);
            edge = self.edge_to[e.start];
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest paths between every pair of vertices.
///
/// Holds one [`Dijkstra`] instance per source vertex: O(V E log V) time to
/// build and space proportional to V^2.
#[derive(Debug, Clone)]
pub struct AllPairsDijkstra {
    paths: Vec<Dijkstra>,
}

impl AllPairsDijkstra {
    /// Compute shortest paths from every vertex of `graph`.
    pub fn new(graph: &WeightedDigraph) -> Result<Self> {
        let paths = (0..graph.vertex_count())
            .map(|s| Dijkstra::new(graph, s))
            .collect::<Result<Vec<_>>>()?;

        Ok(AllPairsDijkstra { paths })
    }

    /// Number of vertices covered.
    pub fn vertex_count(&self) -> usize {
        self.paths.len()
    }

    /// Shortest distance from `s` to `t`, or `None` if `t` is unreachable
    /// from `s` or either vertex is out of range.
    pub fn dist(&self, s: usize, t: usize) -> Option<f64> {
        if s == t && s < self.paths.len() {
            return Some(0.0);
        }
        self.paths.get(s).and_then(|p| p.dist(t))
    }

    /// Check if `t` is reachable from `s`.
    pub fn has_path(&self, s: usize, t: usize) -> bool {
        self.dist(s, t).is_some()
    }

    /// Edges of a shortest path from `s` to `t`, in travel order.
    pub fn path(&self, s: usize, t: usize) -> Option<Vec<DirectedEdge>> {
        self.paths.get(s).and_then(|p| p.path(t))
    }
}
