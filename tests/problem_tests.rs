//! Unit tests for the delivery problem definition.

use delivery_router::error::Error;
use delivery_router::problem::{Problem, DEPOT};
use std::collections::{BTreeMap, BTreeSet};

fn create_demands() -> BTreeMap<usize, usize> {
    [(1, 3), (2, 1), (4, 4), (7, 3)].into_iter().collect()
}

#[test]
fn test_fleet_size_derived_from_demand() {
    // 11 units with capacity 5 need 1 + 11 / 5 = 3 routes
    let problem = Problem::new("Auto".to_string(), create_demands(), 0, 5);

    assert_eq!(problem.route_count(), 3);
    assert_eq!(problem.capacities(), &[5, 5, 5]);
    assert_eq!(problem.total_demand(), 11);
}

#[test]
fn test_explicit_fleet() {
    let problem = Problem::with_capacities("Mixed".to_string(), create_demands(), vec![4, 8]);

    assert_eq!(problem.route_count(), 2);
    assert_eq!(problem.capacity(0), 4);
    assert_eq!(problem.capacity(1), 8);
}

#[test]
fn test_demand_lookup() {
    let mut demands = create_demands();
    demands.insert(DEPOT, 2);
    let problem = Problem::new("Demands".to_string(), demands, 2, 5);

    // The depot is never a stop
    assert_eq!(problem.demand(DEPOT), 0);
    assert_eq!(problem.demand(4), 4);
    assert_eq!(problem.demand(9), 0);
    assert_eq!(problem.stops().collect::<Vec<_>>(), vec![1, 2, 4, 7]);
    assert_eq!(problem.stop_count(), 4);
}

#[test]
fn test_constrain_and_lift() {
    let mut problem = Problem::new("Pins".to_string(), create_demands(), 3, 5);

    problem.constrain(1, 4).unwrap();
    problem.constrain(1, 7).unwrap();
    problem.constrain(1, 7).unwrap();

    assert_eq!(problem.pinned_route(4), Some(1));
    assert_eq!(problem.pinned_route(2), None);
    assert_eq!(problem.constraints(1), BTreeSet::from([4, 7]));
    assert!(problem.constraints(0).is_empty());
    assert!(problem.allows(4, 1));
    assert!(!problem.allows(4, 0));
    assert!(problem.allows(2, 0));

    // Lifting from the wrong route does nothing
    problem.lift(0, 4);
    assert_eq!(problem.pinned_route(4), Some(1));

    problem.lift(1, 4);
    assert_eq!(problem.pinned_route(4), None);
    assert!(problem.allows(4, 0));
}

#[test]
fn test_constrain_errors() {
    let mut problem = Problem::new("Pins".to_string(), create_demands(), 2, 5);
    problem.constrain(0, 1).unwrap();

    assert_eq!(
        problem.constrain(1, 1),
        Err(Error::ConflictingConstraint {
            stop: 1,
            pinned: 0,
            requested: 1
        })
    );
    assert_eq!(
        problem.constrain(2, 4),
        Err(Error::RouteOutOfRange { route: 2, routes: 2 })
    );
}

#[test]
fn test_depot_cannot_be_pinned() {
    let mut problem = Problem::new("Pins".to_string(), create_demands(), 2, 5);

    problem.constrain(1, DEPOT).unwrap();

    assert_eq!(problem.pinned_route(DEPOT), None);
    assert!(problem.allows(DEPOT, 0));
}

#[test]
fn test_problem_serializes_through_constructor_state() {
    let mut problem = Problem::new("Json".to_string(), create_demands(), 2, 5);
    problem.constrain(1, 4).unwrap();

    let json = serde_json::to_value(&problem).unwrap();

    assert_eq!(json["name"], "Json");
    assert_eq!(json["capacities"], serde_json::json!([5, 5]));
    assert_eq!(json["pins"]["4"], 1);
}
