//! Swap-based local search for capacitated route plans.

pub mod shuffle;
pub mod swap;

use crate::config::OptimizerConfig;
use crate::problem::Problem;
use crate::shortest_path::AllPairsDijkstra;
use crate::solution::{score_route, PlanState};

/// Pairwise swap neighbourhood over a padded plan.
///
/// A move exchanges the stops at two interior slots, within one route or
/// across two routes. Moves that would put a pinned stop on another route or
/// overload a route are rejected without further evaluation.
pub struct LocalSearch<'a> {
    pub problem: &'a Problem,
    pub paths: &'a AllPairsDijkstra,
    pub config: &'a OptimizerConfig,
}

impl<'a> LocalSearch<'a> {
    /// Create a new local search instance.
    pub fn new(
        problem: &'a Problem,
        paths: &'a AllPairsDijkstra,
        config: &'a OptimizerConfig,
    ) -> Self {
        LocalSearch {
            problem,
            paths,
            config,
        }
    }

    /// Check that swapping `(route, position)` with `(alt_route, alt_position)`
    /// keeps every pinned stop on its route.
    pub fn validate_constraints(
        &self,
        state: &PlanState,
        route: usize,
        position: usize,
        alt_route: usize,
        alt_position: usize,
    ) -> bool {
        if route == alt_route {
            return true;
        }

        let stop = state.routes[route][position];
        let alt_stop = state.routes[alt_route][alt_position];
        self.problem.allows(stop, alt_route) && self.problem.allows(alt_stop, route)
    }

    /// Loads of both routes after the swap, or `None` if either would exceed
    /// its capacity.
    pub fn validate_capacities(
        &self,
        state: &PlanState,
        route: usize,
        position: usize,
        alt_route: usize,
        alt_position: usize,
    ) -> Option<(usize, usize)> {
        if route == alt_route {
            return Some((state.loads[route], state.loads[route]));
        }

        let demand = self.problem.demand(state.routes[route][position]);
        let alt_demand = self.problem.demand(state.routes[alt_route][alt_position]);

        let load = (state.loads[route] + alt_demand).checked_sub(demand)?;
        let alt_load = (state.loads[alt_route] + demand).checked_sub(alt_demand)?;

        if load > self.problem.capacity(route) || alt_load > self.problem.capacity(alt_route) {
            return None;
        }
        Some((load, alt_load))
    }

    /// Combined distance of the (one or two) routes touched by a swap.
    pub(crate) fn pair_cost(&self, state: &PlanState, route: usize, alt_route: usize) -> f64 {
        let cost = score_route(self.paths, &state.routes[route]);
        if route == alt_route {
            cost
        } else {
            cost + score_route(self.paths, &state.routes[alt_route])
        }
    }
}
