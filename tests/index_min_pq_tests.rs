//! Unit and property tests for the indexed minimum priority queue.

use delivery_router::error::Error;
use delivery_router::index_min_pq::IndexMinPQ;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Creates a queue holding (0, 30), (1, 10), (2, 20) and (6, 15).
fn create_test_queue() -> IndexMinPQ<u32> {
    let mut pq = IndexMinPQ::new(50);
    pq.insert(0, 30).unwrap();
    pq.insert(1, 10).unwrap();
    pq.insert(2, 20).unwrap();
    pq.insert(6, 15).unwrap();
    pq
}

#[test]
fn test_insert_and_contains() {
    let mut pq: IndexMinPQ<u32> = IndexMinPQ::new(50);
    assert!(pq.is_empty());
    assert_eq!(pq.len(), 0);
    assert_eq!(pq.min_index(), None);
    assert_eq!(pq.min_key(), None);

    pq.insert(0, 30).unwrap();
    pq.insert(1, 10).unwrap();
    assert_eq!(pq.len(), 2);
    pq.insert(2, 20).unwrap();
    pq.insert(6, 15).unwrap();
    assert_eq!(pq.len(), 4);

    assert!(pq.contains(0));
    assert!(pq.contains(2));
    assert!(pq.contains(6));
    assert!(!pq.contains(3));
    assert!(!pq.contains(500));
    assert_eq!(pq.key_of(6), Some(15));
    assert_eq!(pq.key_of(3), None);
}

#[test]
fn test_min_and_del_min() {
    let mut pq = create_test_queue();

    assert_eq!(pq.min_index(), Some(1));
    assert_eq!(pq.min_key(), Some(10));
    assert_eq!(pq.del_min(), Some(1));
    assert_eq!(pq.del_min(), Some(6));
    assert_eq!(pq.len(), 2);
    assert_eq!(pq.min_index(), Some(2));
    assert!(!pq.contains(1));
}

#[test]
fn test_change_key_and_delete() {
    let mut pq = create_test_queue();

    pq.change_key(1, 40).unwrap();
    assert_eq!(pq.min_index(), Some(6));
    assert_eq!(pq.min_key(), Some(15));

    pq.delete(6).unwrap();
    assert_eq!(pq.min_index(), Some(2));
    assert_eq!(pq.min_key(), Some(20));
    assert_eq!(pq.len(), 3);

    pq.change_key(0, 1).unwrap();
    assert_eq!(pq.min_index(), Some(0));
}

#[test]
fn test_invalid_operations() {
    let mut pq = create_test_queue();

    assert_eq!(pq.insert(1, 5), Err(Error::DuplicateIndex(1)));
    assert_eq!(pq.delete(3), Err(Error::MissingIndex(3)));
    assert_eq!(pq.change_key(3, 5), Err(Error::MissingIndex(3)));
    assert_eq!(
        pq.insert(50, 5),
        Err(Error::IndexOutOfRange {
            index: 50,
            capacity: 50
        })
    );
    // Failed operations leave the queue untouched
    assert_eq!(pq.len(), 4);
    assert_eq!(pq.min_key(), Some(10));
}

#[test]
fn test_del_min_drains_in_key_order() {
    let mut pq = create_test_queue();
    let mut drained = Vec::new();

    while let Some(i) = pq.del_min() {
        drained.push(i);
    }

    assert_eq!(drained, vec![1, 6, 2, 0]);
    assert!(pq.is_empty());
}

#[test]
fn test_resize_shrink_drops_high_indices() {
    let mut pq = create_test_queue();

    pq.resize(3);

    assert_eq!(pq.capacity(), 3);
    assert_eq!(pq.len(), 3);
    assert!(!pq.contains(6));
    assert_eq!(pq.del_min(), Some(1));
    assert_eq!(pq.del_min(), Some(2));
    assert_eq!(pq.del_min(), Some(0));
    assert_eq!(pq.del_min(), None);
}

#[test]
fn test_resize_grow_keeps_entries() {
    let mut pq = create_test_queue();

    pq.resize(100);

    assert_eq!(pq.capacity(), 100);
    assert_eq!(pq.len(), 4);
    pq.insert(99, 1).unwrap();
    assert_eq!(pq.min_index(), Some(99));
    assert_eq!(pq.key_of(6), Some(15));
}

#[test]
fn test_float_keys() {
    let mut pq = IndexMinPQ::new(3);
    pq.insert(0, 2.5).unwrap();
    pq.insert(1, 0.5).unwrap();
    pq.insert(2, 1.5).unwrap();

    assert_eq!(pq.min_key(), Some(0.5));
    pq.change_key(1, 3.0).unwrap();
    assert_eq!(pq.min_index(), Some(2));
}

const CAPACITY: usize = 12;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, u32),
    ChangeKey(usize, u32),
    Delete(usize),
    DelMin,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CAPACITY, 0u32..100).prop_map(|(i, key)| Op::Insert(i, key)),
        (0..CAPACITY, 0u32..100).prop_map(|(i, key)| Op::ChangeKey(i, key)),
        (0..CAPACITY).prop_map(Op::Delete),
        Just(Op::DelMin),
    ]
}

proptest! {
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut pq = IndexMinPQ::new(CAPACITY);
        let mut model: BTreeMap<usize, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(i, key) => {
                    let result = pq.insert(i, key);
                    if model.contains_key(&i) {
                        prop_assert_eq!(result, Err(Error::DuplicateIndex(i)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(i, key);
                    }
                }
                Op::ChangeKey(i, key) => {
                    let result = pq.change_key(i, key);
                    if model.contains_key(&i) {
                        prop_assert!(result.is_ok());
                        model.insert(i, key);
                    } else {
                        prop_assert_eq!(result, Err(Error::MissingIndex(i)));
                    }
                }
                Op::Delete(i) => {
                    let result = pq.delete(i);
                    if model.remove(&i).is_some() {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert_eq!(result, Err(Error::MissingIndex(i)));
                    }
                }
                Op::DelMin => {
                    let expected = model.values().min().copied();
                    match pq.del_min() {
                        Some(i) => {
                            prop_assert_eq!(model.remove(&i), expected);
                        }
                        None => prop_assert!(expected.is_none()),
                    }
                }
            }

            prop_assert_eq!(pq.len(), model.len());
            prop_assert_eq!(pq.min_key(), model.values().min().copied());
            for i in 0..CAPACITY {
                prop_assert_eq!(pq.contains(i), model.contains_key(&i));
            }
        }
    }
}
