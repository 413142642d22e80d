//! Exhaustive swap sweeps until a local optimum or the sweep budget.

use crate::problem::DEPOT;
use crate::solution::{score_all, PlanState};
use log::trace;

use super::LocalSearch;

impl<'a> LocalSearch<'a> {
    /// Sweep every pair of interior slots, keeping swaps that do not
    /// increase the distance of the affected routes.
    ///
    /// Runs at most `config.iterations` sweeps and stops early once the plan
    /// cost has moved by less than `config.tolerance` for
    /// `config.early_stopping` consecutive sweeps. Updates `state` in place
    /// and returns its final cost.
    pub fn optimize_local(&self, state: &mut PlanState, restart: usize) -> f64 {
        let routes = state.route_count();
        let slots = state.slot_count();
        state.cost = score_all(self.paths, &state.routes);

        if slots < 3 {
            return state.cost;
        }

        let mut last_cost = state.cost;
        let mut unchanged = 0;

        for iteration in 0..self.config.iterations {
            for route in 0..routes {
                for position in 1..slots - 1 {
                    for alt_route in route..routes {
                        let first = if alt_route == route { position + 1 } else { 1 };
                        for alt_position in first..slots - 1 {
                            self.try_swap(state, route, position, alt_route, alt_position);
                        }
                    }
                }
            }

            let new_cost = score_all(self.paths, &state.routes);
            if new_cost < state.cost {
                trace!(
                    "Restart {}, sweep {}: cost {:.2} -> {:.2}",
                    restart,
                    iteration,
                    state.cost,
                    new_cost
                );
            }
            state.cost = new_cost;

            if (last_cost - new_cost).abs() < self.config.tolerance {
                unchanged += 1;
                if self.config.early_stopping > 0 && unchanged >= self.config.early_stopping {
                    break;
                }
            } else {
                unchanged = 0;
            }
            last_cost = new_cost;
        }

        state.cost
    }

    /// Apply one swap if it is allowed and does not increase cost.
    ///
    /// Returns whether the swap was kept. Ties are kept so that stops can
    /// drift across plateaus.
    pub fn try_swap(
        &self,
        state: &mut PlanState,
        route: usize,
        position: usize,
        alt_route: usize,
        alt_position: usize,
    ) -> bool {
        if state.routes[route][position] == DEPOT && state.routes[alt_route][alt_position] == DEPOT {
            return false;
        }
        if !self.validate_constraints(state, route, position, alt_route, alt_position) {
            return false;
        }
        let Some((load, alt_load)) =
            self.validate_capacities(state, route, position, alt_route, alt_position)
        else {
            return false;
        };

        let current_cost = self.pair_cost(state, route, alt_route);
        state.swap(route, position, alt_route, alt_position);
        let alt_cost = self.pair_cost(state, route, alt_route);

        if alt_cost <= current_cost {
            state.loads[route] = load;
            state.loads[alt_route] = alt_load;
            true
        } else {
            state.swap(route, position, alt_route, alt_position);
            false
        }
    }
}
