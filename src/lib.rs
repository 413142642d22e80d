//! # Delivery Router
//!
//! Assigns delivery stops to a fixed fleet of capacity-bounded routes and
//! orders each route's stops to reduce total travel distance.
//!
//! Distances are shortest paths on a static weighted digraph, computed once
//! with Dijkstra's algorithm from every vertex. The route optimizer runs a
//! randomized multi-start pairwise-swap hill climb on top of them, honouring
//! route capacities and stops pinned to specific routes. A greedy
//! nearest-neighbour planner is available as a simpler alternative.

pub mod config;
pub mod error;
pub mod graph;
pub mod index_min_pq;
pub mod local_search;
pub mod nearest_neighbor;
pub mod optimizer;
pub mod problem;
pub mod shortest_path;
pub mod solution;

pub use crate::config::OptimizerConfig;
pub use crate::error::{Error, Result};
pub use crate::graph::{DirectedEdge, WeightedDigraph};
pub use crate::index_min_pq::IndexMinPQ;
pub use crate::nearest_neighbor::NNRoutePlanner;
pub use crate::optimizer::SwapRoutePlanner;
pub use crate::problem::{Problem, DEPOT};
pub use crate::shortest_path::{AllPairsDijkstra, Dijkstra};
pub use crate::solution::PlanState;

/// Compute all-pairs shortest paths on `graph` and optimize `problem` with
/// sequential restarts.
pub fn plan_routes(
    graph: &WeightedDigraph,
    problem: Problem,
    config: OptimizerConfig,
) -> Result<PlanState> {
    let paths = AllPairsDijkstra::new(graph)?;
    let planner = SwapRoutePlanner::new(&paths, problem, config)?;
    planner.optimize()
}
