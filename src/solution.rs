//! Route plan representation and plan cost evaluation.

use crate::error::{Error, Result};
use crate::problem::{Problem, DEPOT};
use crate::shortest_path::AllPairsDijkstra;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A route plan together with its per-route loads and total cost.
///
/// During search every route has the same number of slots: slot 0 and the
/// last slot hold the depot and interior slots hold either a stop or a depot
/// placeholder. [`clean_plan`] removes the placeholders.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    /// Ordered stop ids of each route
    pub routes: Vec<Vec<usize>>,
    /// Demand units carried by each route
    pub loads: Vec<usize>,
    /// Total travel distance of all routes
    pub cost: f64,
}

impl PlanState {
    /// Create a new plan state.
    pub fn new(routes: Vec<Vec<usize>>, loads: Vec<usize>, cost: f64) -> Self {
        PlanState {
            routes,
            loads,
            cost,
        }
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of slots per route, anchors included.
    pub fn slot_count(&self) -> usize {
        self.routes.first().map_or(0, |route| route.len())
    }

    /// Exchange the stops at `(route, position)` and `(alt_route, alt_position)`.
    pub fn swap(&mut self, route: usize, position: usize, alt_route: usize, alt_position: usize) {
        if route == alt_route {
            self.routes[route].swap(position, alt_position);
            return;
        }

        let temp = self.routes[route][position];
        self.routes[route][position] = self.routes[alt_route][alt_position];
        self.routes[alt_route][alt_position] = temp;
    }

    /// All stops visited by the plan, depot excluded.
    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flatten().copied().filter(|&s| s != DEPOT)
    }

    /// The route visiting `stop`, if any.
    pub fn route_of(&self, stop: usize) -> Option<usize> {
        self.routes.iter().position(|route| route.contains(&stop))
    }
}

impl fmt::Debug for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan:")?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (Load: {})",
                i,
                route,
                self.loads.get(i).copied().unwrap_or(0)
            )?;
        }

        Ok(())
    }
}

/// Strip depot placeholders and leave exactly one depot at each end of
/// every route.
pub fn clean_plan(routes: &mut [Vec<usize>]) {
    for route in routes.iter_mut() {
        route.retain(|&stop| stop != DEPOT);
        route.insert(0, DEPOT);
        route.push(DEPOT);
    }
}

/// Distance of one leg; unreachable legs cost `f64::INFINITY`.
pub fn leg_cost(paths: &AllPairsDijkstra, from: usize, to: usize) -> f64 {
    paths.dist(from, to).unwrap_or(f64::INFINITY)
}

/// Travel distance of a route visiting its stops in order.
pub fn score_route(paths: &AllPairsDijkstra, route: &[usize]) -> f64 {
    route
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| leg_cost(paths, from, to))
        .sum()
}

/// Travel distance summed over every route of a plan.
pub fn score_all(paths: &AllPairsDijkstra, routes: &[Vec<usize>]) -> f64 {
    routes.iter().map(|route| score_route(paths, route)).sum()
}

/// Distance from each stop's predecessor, aligned with the plan.
///
/// The first entry of every route is zero.
pub fn distances(paths: &AllPairsDijkstra, routes: &[Vec<usize>]) -> Vec<Vec<f64>> {
    routes
        .iter()
        .map(|route| {
            std::iter::once(0.0)
                .chain(
                    route
                        .iter()
                        .tuple_windows()
                        .map(|(&from, &to)| leg_cost(paths, from, to)),
                )
                .take(route.len())
                .collect()
        })
        .collect()
}

/// Demand units carried by each route.
pub fn calculate_loads(problem: &Problem, routes: &[Vec<usize>]) -> Vec<usize> {
    routes
        .iter()
        .map(|route| route.iter().map(|&stop| problem.demand(stop)).sum())
        .collect()
}

/// Spread the stops of `problem` over its routes.
///
/// Stops are taken in id order. Pinned stops go to their route; every other
/// stop goes to the least loaded route it still fits on, the first one on
/// ties. Returns the stops of each route, depot excluded, and the loads.
pub fn assign_stops(problem: &Problem) -> Result<(Vec<Vec<usize>>, Vec<usize>)> {
    let n_routes = problem.route_count();
    let mut routes = vec![Vec::new(); n_routes];
    let mut loads = vec![0; n_routes];

    for stop in problem.stops() {
        let demand = problem.demand(stop);
        let route = match problem.pinned_route(stop) {
            Some(route) => route,
            None => {
                let least_loaded = |fits: bool| {
                    loads
                        .iter()
                        .enumerate()
                        .filter(|&(route, &load)| !fits || load + demand <= problem.capacity(route))
                        .min_by_key(|&(_, &load)| load)
                        .map(|(route, _)| route)
                };
                // Overflow the least loaded route when nothing fits; the
                // capacity check below reports it.
                least_loaded(true)
                    .or_else(|| least_loaded(false))
                    .ok_or(Error::RouteOutOfRange {
                        route: 0,
                        routes: n_routes,
                    })?
            }
        };

        if route >= n_routes {
            return Err(Error::RouteOutOfRange {
                route,
                routes: n_routes,
            });
        }

        loads[route] += demand;
        routes[route].push(stop);
    }

    for (route, &load) in loads.iter().enumerate() {
        let capacity = problem.capacity(route);
        if load > capacity {
            return Err(Error::CapacityExceeded {
                route,
                load,
                capacity,
            });
        }
    }

    Ok((routes, loads))
}
