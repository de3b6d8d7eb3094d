// Property tests: batch size never changes what a node produces

use std::cmp::Ordering;

use beamview::inspector::{BatchOutcome, ChildrenList, PaginatedValueNode};
use beamview::term::{compare, Atom, Pid, Port, Reference, RemoteValue};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn scalar() -> impl Strategy<Value = RemoteValue> {
    prop_oneof![
        any::<i64>().prop_map(RemoteValue::Integer),
        (-1.0e6..1.0e6f64).prop_map(RemoteValue::Float),
        "[a-z][a-z0-9_]{0,6}".prop_map(|name| RemoteValue::atom(&name)),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(|bytes| RemoteValue::binary(&bytes)),
    ]
}

/// Handles from a tiny space so that near-equal pairs are common
fn handle() -> impl Strategy<Value = RemoteValue> {
    let node = prop_oneof![Just("a@host"), Just("b@host")].prop_map(Atom::new);
    prop_oneof![
        (node.clone(), 0u32..3, 0u32..2, 0u32..3).prop_map(|(node, id, serial, creation)| {
            RemoteValue::Pid(Pid {
                node,
                id,
                serial,
                creation,
            })
        }),
        (node.clone(), 0u64..3).prop_map(|(node, id)| RemoteValue::Port(Port { node, id })),
        (node, prop::collection::vec(0u32..3, 1..4)).prop_map(|(node, ids)| {
            RemoteValue::Reference(Reference {
                node,
                ids: ids.into(),
            })
        }),
    ]
}

fn key() -> impl Strategy<Value = RemoteValue> {
    prop_oneof![scalar(), handle()]
}

fn container() -> impl Strategy<Value = RemoteValue> {
    prop_oneof![
        prop::collection::vec(scalar(), 0..300).prop_map(RemoteValue::list),
        prop::collection::vec(scalar(), 0..40).prop_map(RemoteValue::tuple),
        prop::collection::vec((scalar(), scalar()), 0..120).prop_map(RemoteValue::map),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(|bytes| RemoteValue::binary(&bytes)),
    ]
}

/// Drain a node with a fixed batch size; returns (label, display) pairs and the call count
fn drain(value: &RemoteValue, batch_size: usize) -> (Vec<(String, String)>, usize) {
    let mut node = PaginatedValueNode::new(value.clone());
    let mut sink = ChildrenList::new();
    let mut calls = 0;
    loop {
        calls += 1;
        match node.compute_next_batch(&mut sink, batch_size) {
            Ok(BatchOutcome::Exhausted) => break,
            Ok(BatchOutcome::MoreRemain(_)) => {}
            Err(err) => panic!("local batch failed: {}", err),
        }
    }
    let children = sink
        .into_entries()
        .into_iter()
        .map(|(label, child)| (label, child.value().to_string()))
        .collect();
    (children, calls)
}

proptest! {
    #[test]
    fn chunk_size_does_not_change_children(value in container(), batch_size in 1usize..150) {
        let total = PaginatedValueNode::new(value.clone()).children_count();
        let (all_at_once, _) = drain(&value, total.max(1));
        let (chunked, calls) = drain(&value, batch_size);

        prop_assert_eq!(chunked.len(), total);
        prop_assert_eq!(&chunked, &all_at_once);
        // Leaves take one call that reports Exhausted right away
        prop_assert_eq!(calls, total.div_ceil(batch_size).max(1));
    }

    #[test]
    fn map_keys_are_unique_and_ordered(entries in prop::collection::vec((key(), scalar()), 0..80)) {
        let value = RemoteValue::map(entries);
        let RemoteValue::Map(map) = &value else {
            unreachable!("map constructor built another variant");
        };
        let keys: Vec<&RemoteValue> = map.iter().map(|(key, _)| key).collect();
        for pair in keys.windows(2) {
            prop_assert_eq!(compare(pair[0], pair[1]), Ordering::Less);
        }

        let (children, _) = drain(&value, 16);
        let labels: FxHashSet<&str> = children.iter().map(|(label, _)| label.as_str()).collect();
        prop_assert_eq!(labels.len(), map.len());
    }

    #[test]
    fn canonical_order_is_antisymmetric(a in key(), b in key()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }
}
