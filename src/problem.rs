//! Delivery problem definition: stop demands, route capacities and pins.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Vertex id of the depot every route starts and ends at.
pub const DEPOT: usize = 0;

/// A delivery problem over a fixed fleet of routes.
///
/// Demand is counted in whole units (parcels) per stop. A stop may be pinned
/// to one route, in which case no plan produced by the optimizer moves it
/// elsewhere.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub name: String,
    demands: BTreeMap<usize, usize>,
    capacities: Vec<usize>,
    pins: BTreeMap<usize, usize>,
}

impl Problem {
    /// Create a problem where every route has the same `capacity`.
    ///
    /// Passing `n_routes == 0` sizes the fleet from the total demand as
    /// `1 + total / capacity`.
    pub fn new(
        name: String,
        demands: BTreeMap<usize, usize>,
        n_routes: usize,
        capacity: usize,
    ) -> Self {
        let demands = Self::without_depot(demands);
        let n_routes = if n_routes == 0 {
            let total: usize = demands.values().sum();
            1 + total / capacity.max(1)
        } else {
            n_routes
        };

        Problem {
            name,
            demands,
            capacities: vec![capacity; n_routes],
            pins: BTreeMap::new(),
        }
    }

    /// Create a problem with an explicit capacity per route.
    pub fn with_capacities(
        name: String,
        demands: BTreeMap<usize, usize>,
        capacities: Vec<usize>,
    ) -> Self {
        Problem {
            name,
            demands: Self::without_depot(demands),
            capacities,
            pins: BTreeMap::new(),
        }
    }

    fn without_depot(mut demands: BTreeMap<usize, usize>) -> BTreeMap<usize, usize> {
        demands.remove(&DEPOT);
        demands
    }

    /// Number of routes in the fleet.
    pub fn route_count(&self) -> usize {
        self.capacities.len()
    }

    /// Capacity of each route, in demand units.
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Capacity of `route`.
    pub fn capacity(&self, route: usize) -> usize {
        self.capacities[route]
    }

    /// Demand units at `stop`; zero for the depot and unknown stops.
    pub fn demand(&self, stop: usize) -> usize {
        self.demands.get(&stop).copied().unwrap_or(0)
    }

    /// Every stop with demand, in ascending id order.
    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        self.demands.keys().copied()
    }

    /// Number of stops excluding the depot.
    pub fn stop_count(&self) -> usize {
        self.demands.len()
    }

    /// Sum of demand over all stops.
    pub fn total_demand(&self) -> usize {
        self.demands.values().sum()
    }

    /// Pin `stop` to `route`.
    ///
    /// Pinning a stop again to the same route is a no-op, and so is pinning
    /// the depot. Pinning a stop to a different route fails until the first
    /// pin is lifted.
    pub fn constrain(&mut self, route: usize, stop: usize) -> Result<()> {
        self.check_route(route)?;

        // The depot anchors every route.
        if stop == DEPOT {
            return Ok(());
        }

        match self.pins.get(&stop) {
            Some(&pinned) if pinned != route => Err(Error::ConflictingConstraint {
                stop,
                pinned,
                requested: route,
            }),
            _ => {
                self.pins.insert(stop, route);
                Ok(())
            }
        }
    }

    /// Remove the pin of `stop` to `route`, if there is one.
    pub fn lift(&mut self, route: usize, stop: usize) {
        if self.pins.get(&stop) == Some(&route) {
            self.pins.remove(&stop);
        }
    }

    /// The route `stop` is pinned to, if any.
    pub fn pinned_route(&self, stop: usize) -> Option<usize> {
        self.pins.get(&stop).copied()
    }

    /// Check if `stop` may be placed on `route` without breaking its pin.
    pub fn allows(&self, stop: usize, route: usize) -> bool {
        self.pinned_route(stop).map_or(true, |pinned| pinned == route)
    }

    /// Stops pinned to `route`.
    pub fn constraints(&self, route: usize) -> BTreeSet<usize> {
        self.pins
            .iter()
            .filter(|&(_, &r)| r == route)
            .map(|(&stop, _)| stop)
            .collect()
    }

    fn check_route(&self, route: usize) -> Result<()> {
        if route >= self.route_count() {
            return Err(Error::RouteOutOfRange {
                route,
                routes: self.route_count(),
            });
        }
        Ok(())
    }
}
