//! Capacitated route optimizer: randomized multi-start swap hill climbing.

use crate::config::OptimizerConfig;
use crate::error::{Error, Result};
use crate::local_search::LocalSearch;
use crate::problem::{Problem, DEPOT};
use crate::shortest_path::AllPairsDijkstra;
use crate::solution::{self, PlanState};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Assigns stops to routes and orders them to reduce total travel distance.
///
/// Distances come from an [`AllPairsDijkstra`] oracle. The planner itself is
/// immutable; plans are passed in and returned as [`PlanState`] values.
///
/// Worst case time per restart is O(I (R S)^2 S) for I sweeps over R routes
/// of S slots each. There is no optimality guarantee: restarts only lower
/// the chance of ending in a poor local optimum.
pub struct SwapRoutePlanner<'a> {
    paths: &'a AllPairsDijkstra,
    problem: Problem,
    config: OptimizerConfig,
}

impl<'a> SwapRoutePlanner<'a> {
    /// Create a planner, checking that every stop exists in the graph and
    /// that the depot and all stops can reach each other.
    pub fn new(
        paths: &'a AllPairsDijkstra,
        problem: Problem,
        config: OptimizerConfig,
    ) -> Result<Self> {
        let vertex_count = paths.vertex_count();
        let required: Vec<usize> = std::iter::once(DEPOT).chain(problem.stops()).collect();

        for &vertex in &required {
            if vertex >= vertex_count {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }

        for &from in &required {
            for &to in &required {
                if !paths.has_path(from, to) {
                    return Err(Error::Unreachable { from, to });
                }
            }
        }

        Ok(SwapRoutePlanner {
            paths,
            problem,
            config,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn paths(&self) -> &AllPairsDijkstra {
        self.paths
    }

    fn local_search(&self) -> LocalSearch<'_> {
        LocalSearch::new(&self.problem, self.paths, &self.config)
    }

    /// Build the starting plan.
    ///
    /// Pinned stops go to their route; every other stop goes to the least
    /// loaded route it fits on (first one on ties). Routes are then padded
    /// with depot placeholders to a common slot count.
    pub fn initial_plan(&self) -> Result<PlanState> {
        let (routes, loads) = solution::assign_stops(&self.problem)?;
        let routes = self.padded(&routes);
        let cost = solution::score_all(self.paths, &routes);
        Ok(PlanState::new(routes, loads, cost))
    }

    /// Lay `routes` out as search slots.
    ///
    /// Depots are stripped and every route is rebuilt as the depot, its
    /// stops, then depot placeholders up to a common length. Every route gets
    /// room for as many stops as the largest capacity allows, bounded by the
    /// number of stops there are.
    fn padded(&self, routes: &[Vec<usize>]) -> Vec<Vec<usize>> {
        let stops: Vec<Vec<usize>> = routes
            .iter()
            .map(|route| route.iter().copied().filter(|&s| s != DEPOT).collect())
            .collect();

        let max_capacity = self.problem.capacities().iter().copied().max().unwrap_or(0);
        let longest = stops.iter().map(Vec::len).max().unwrap_or(0);
        let interior = max_capacity.min(self.problem.stop_count()).max(longest);

        stops
            .into_iter()
            .map(|stops| {
                let mut route = Vec::with_capacity(interior + 2);
                route.push(DEPOT);
                route.extend(stops);
                route.resize(interior + 2, DEPOT);
                route
            })
            .collect()
    }

    /// Re-pad `plan` and recompute its loads and cost from scratch.
    fn prepare(&self, plan: PlanState) -> PlanState {
        let routes = self.padded(&plan.routes);
        let loads = solution::calculate_loads(&self.problem, &routes);
        let cost = solution::score_all(self.paths, &routes);
        PlanState::new(routes, loads, cost)
    }

    /// Run the multi-start search from `initial` with the given random source.
    ///
    /// Each restart shuffles a copy of the best plan found so far, runs local
    /// search on it and adopts the result if it is strictly cheaper. The
    /// returned plan is cleaned of depot placeholders and its cost is never
    /// above the cost of `initial`.
    ///
    /// `initial` may be any plan with one route per fleet route, padded or
    /// not, such as one returned by an earlier run. Its loads and cost are
    /// recomputed.
    pub fn optimize_global<R: Rng + ?Sized>(&self, initial: PlanState, rng: &mut R) -> PlanState {
        let search = self.local_search();
        let mut best = self.prepare(initial);

        info!("Start cost: {:.2}", best.cost);

        for start in 0..self.config.starts {
            let mut candidate = best.clone();
            search.shuffle(&mut candidate, rng);
            let cost = search.optimize_local(&mut candidate, start);
            debug!("Restart {} converged to cost {:.2}", start, cost);

            if cost < best.cost {
                info!("New minimum cost: {:.2}", cost);
                best = candidate;
            }
        }

        self.finish(best)
    }

    /// Run the restarts in parallel, each on a private copy of `initial`.
    ///
    /// `initial` is prepared the same way as in [`Self::optimize_global`].
    ///
    /// Restart `k` draws from a `ChaCha8Rng` seeded with `seed + k`, so the
    /// result does not depend on thread scheduling. Among equally cheap
    /// results the lowest restart index wins.
    pub fn optimize_global_parallel(&self, initial: PlanState, seed: u64) -> PlanState {
        let search = self.local_search();
        let initial = self.prepare(initial);

        info!("Start cost: {:.2}", initial.cost);

        let best = (0..self.config.starts)
            .into_par_iter()
            .map(|start| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(start as u64));
                let mut candidate = initial.clone();
                search.shuffle(&mut candidate, &mut rng);
                let cost = search.optimize_local(&mut candidate, start);
                debug!("Restart {} converged to cost {:.2}", start, cost);
                (start, candidate)
            })
            .reduce_with(|a, b| {
                if b.1.cost < a.1.cost || (b.1.cost == a.1.cost && b.0 < a.0) {
                    b
                } else {
                    a
                }
            });

        let best = match best {
            Some((start, candidate)) if candidate.cost < initial.cost => {
                info!("New minimum cost: {:.2} (restart {})", candidate.cost, start);
                candidate
            }
            _ => initial,
        };

        self.finish(best)
    }

    /// Build the initial plan and optimize it sequentially, seeding the
    /// random source from the configuration.
    pub fn optimize(&self) -> Result<PlanState> {
        let initial = self.initial_plan()?;
        let mut rng = self.config.rng();
        Ok(self.optimize_global(initial, &mut rng))
    }

    /// Build the initial plan and optimize it with parallel restarts.
    pub fn optimize_parallel(&self) -> Result<PlanState> {
        let initial = self.initial_plan()?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        Ok(self.optimize_global_parallel(initial, seed))
    }

    fn finish(&self, mut best: PlanState) -> PlanState {
        solution::clean_plan(&mut best.routes);
        best.cost = solution::score_all(self.paths, &best.routes);
        best.loads = solution::calculate_loads(&self.problem, &best.routes);
        info!("End cost: {:.2}", best.cost);
        best
    }

    /// Travel distance of one route.
    pub fn score_route(&self, route: &[usize]) -> f64 {
        solution::score_route(self.paths, route)
    }

    /// Travel distance of a whole plan.
    pub fn score_all(&self, routes: &[Vec<usize>]) -> f64 {
        solution::score_all(self.paths, routes)
    }

    /// Distance of every stop from its predecessor, aligned with `routes`.
    pub fn distances(&self, routes: &[Vec<usize>]) -> Vec<Vec<f64>> {
        solution::distances(self.paths, routes)
    }

    /// Demand units carried by each route of `routes`.
    pub fn calculate_loads(&self, routes: &[Vec<usize>]) -> Vec<usize> {
        solution::calculate_loads(&self.problem, routes)
    }
}
