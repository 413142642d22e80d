//! Greedy nearest-neighbour sequencing of already assigned stops.

use crate::error::Result;
use crate::graph::DirectedEdge;
use crate::problem::{Problem, DEPOT};
use crate::shortest_path::AllPairsDijkstra;
use crate::solution::{self, PlanState};
use itertools::Itertools;
use log::warn;
use std::cmp::Ordering;

/// Orders the stops of each route by repeatedly driving to the closest
/// stop not yet visited.
///
/// Unlike [`crate::optimizer::SwapRoutePlanner`] it never moves a stop to
/// another route. Sequencing a route of N stops takes O(N^2) distance lookups.
pub struct NNRoutePlanner<'a> {
    paths: &'a AllPairsDijkstra,
}

impl<'a> NNRoutePlanner<'a> {
    pub fn new(paths: &'a AllPairsDijkstra) -> Self {
        NNRoutePlanner { paths }
    }

    /// Arrange `locations` into a depot-to-depot path.
    ///
    /// Depot entries and repeated stops in `locations` are ignored. Stops
    /// that cannot be reached from the current position are appended in
    /// input order once no reachable stop remains.
    pub fn optimize_route(&self, locations: &[usize]) -> Vec<usize> {
        let mut remaining: Vec<usize> = locations
            .iter()
            .copied()
            .filter(|&stop| stop != DEPOT)
            .unique()
            .collect();
        let mut path = Vec::with_capacity(remaining.len() + 2);
        path.push(DEPOT);
        let mut current = DEPOT;

        while !remaining.is_empty() {
            let nearest = remaining
                .iter()
                .enumerate()
                .filter_map(|(k, &stop)| self.paths.dist(current, stop).map(|d| (k, d)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

            match nearest {
                Some((k, _)) => {
                    current = remaining.remove(k);
                    path.push(current);
                }
                None => {
                    warn!(
                        "Stops {:?} are unreachable from {}, appending them unordered",
                        remaining, current
                    );
                    path.append(&mut remaining);
                }
            }
        }

        path.push(DEPOT);
        path
    }

    /// Sequence every route of `plan`.
    pub fn optimize_plan(&self, plan: &[Vec<usize>]) -> Vec<Vec<usize>> {
        plan.iter().map(|route| self.optimize_route(route)).collect()
    }

    /// Assign the stops of `problem` to its routes and sequence each route.
    ///
    /// Assignment is the same balanced one the swap optimizer starts from,
    /// but no reachability is required: unreachable stops end up at the back
    /// of their route and the plan cost is infinite.
    pub fn plan(&self, problem: &Problem) -> Result<PlanState> {
        let (routes, loads) = solution::assign_stops(problem)?;
        let routes = self.optimize_plan(&routes);
        let cost = self.score_all(&routes);
        Ok(PlanState::new(routes, loads, cost))
    }

    /// Travel distance of one route.
    pub fn score_route(&self, route: &[usize]) -> f64 {
        solution::score_route(self.paths, route)
    }

    /// Travel distance of a whole plan.
    pub fn score_all(&self, plan: &[Vec<usize>]) -> f64 {
        solution::score_all(self.paths, plan)
    }

    /// Distance of every stop from its predecessor, aligned with `plan`.
    pub fn distances(&self, plan: &[Vec<usize>]) -> Vec<Vec<f64>> {
        solution::distances(self.paths, plan)
    }

    /// Demand units carried by each route of `plan`.
    pub fn calculate_loads(&self, problem: &Problem, plan: &[Vec<usize>]) -> Vec<usize> {
        solution::calculate_loads(problem, plan)
    }

    /// Edges of a shortest path from `s` to `t`.
    pub fn path(&self, s: usize, t: usize) -> Option<Vec<DirectedEdge>> {
        self.paths.path(s, t)
    }
}
