//! Constrained random perturbation of a plan between restarts.

use crate::solution::{score_all, PlanState};
use rand::Rng;

use super::LocalSearch;

impl<'a> LocalSearch<'a> {
    /// Shuffle `state` in place without breaking pins or capacities.
    ///
    /// Each interior slot proposes a swap with a uniformly random interior
    /// slot: of any route for free stops, of the same route for pinned ones.
    /// Proposals are validated like local search moves and dropped when
    /// invalid. The whole pass runs `config.shuffle_repetitions` times.
    pub fn shuffle<R: Rng + ?Sized>(&self, state: &mut PlanState, rng: &mut R) {
        let routes = state.route_count();
        let slots = state.slot_count();

        if routes == 0 || slots < 3 {
            return;
        }

        for _ in 0..self.config.shuffle_repetitions {
            for route in 0..routes {
                for position in 1..slots - 1 {
                    let stop = state.routes[route][position];
                    let alt_route = if self.problem.pinned_route(stop).is_some() {
                        route
                    } else {
                        rng.gen_range(0..routes)
                    };
                    let alt_position = rng.gen_range(1..slots - 1);

                    if alt_route == route && alt_position == position {
                        continue;
                    }
                    if !self.validate_constraints(state, route, position, alt_route, alt_position)
                    {
                        continue;
                    }
                    if let Some((load, alt_load)) =
                        self.validate_capacities(state, route, position, alt_route, alt_position)
                    {
                        state.swap(route, position, alt_route, alt_position);
                        state.loads[route] = load;
                        state.loads[alt_route] = alt_load;
                    }
                }
            }
        }

        state.cost = score_all(self.paths, &state.routes);
    }
}
