//! Canonical term order
//!
//! A total order over [`RemoteValue`] used wherever the inspector needs a
//! deterministic sequence that the remote container does not define itself
//! (map keys). It follows BEAM term order, with two tie-breakers that make it
//! total: an integer sorts before a float of equal value, and floats compare
//! with [`f64::total_cmp`].

use super::value::{RemoteValue, TermMap};
use std::cmp::Ordering;

/// Rank of each variant class in term order
fn rank(value: &RemoteValue) -> u8 {
    match value {
        RemoteValue::Integer(_) | RemoteValue::Float(_) => 0,
        RemoteValue::Atom(_) => 1,
        RemoteValue::Reference(_) => 2,
        RemoteValue::Fun(_) => 3,
        RemoteValue::Port(_) => 4,
        RemoteValue::Pid(_) => 5,
        RemoteValue::Tuple(_) => 6,
        RemoteValue::Map(_) => 7,
        RemoteValue::List(_) => 8,
        RemoteValue::Binary(_) => 9,
    }
}

/// Compare two values in canonical term order
pub fn compare(a: &RemoteValue, b: &RemoteValue) -> Ordering {
    match (a, b) {
        (RemoteValue::Integer(x), RemoteValue::Integer(y)) => x.cmp(y),
        (RemoteValue::Float(x), RemoteValue::Float(y)) => x.total_cmp(y),
        (RemoteValue::Integer(x), RemoteValue::Float(y)) => compare_mixed(*x, *y),
        (RemoteValue::Float(x), RemoteValue::Integer(y)) => compare_mixed(*y, *x).reverse(),
        (RemoteValue::Atom(x), RemoteValue::Atom(y)) => x.cmp(y),
        (RemoteValue::Reference(x), RemoteValue::Reference(y)) => {
            x.node.cmp(&y.node).then_with(|| x.ids.cmp(&y.ids))
        }
        (RemoteValue::Fun(x), RemoteValue::Fun(y)) => x
            .module
            .cmp(&y.module)
            .then(x.index.cmp(&y.index))
            .then(x.uniq.cmp(&y.uniq)),
        (RemoteValue::Port(x), RemoteValue::Port(y)) => {
            x.node.cmp(&y.node).then(x.id.cmp(&y.id))
        }
        (RemoteValue::Pid(x), RemoteValue::Pid(y)) => x
            .node
            .cmp(&y.node)
            .then(x.id.cmp(&y.id))
            .then(x.serial.cmp(&y.serial))
            .then(x.creation.cmp(&y.creation)),
        (RemoteValue::Tuple(x), RemoteValue::Tuple(y)) => {
            x.len().cmp(&y.len()).then_with(|| compare_seq(x, y))
        }
        (RemoteValue::Map(x), RemoteValue::Map(y)) => compare_maps(x, y),
        (RemoteValue::List(x), RemoteValue::List(y)) => compare_seq(x, y),
        (RemoteValue::Binary(x), RemoteValue::Binary(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// 2^63, the first float above every `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact integer/float comparison; `int as f64` would round above 2^53
fn compare_mixed(int: i64, float: f64) -> Ordering {
    if !float.is_finite() {
        return (int as f64).total_cmp(&float).then(Ordering::Less);
    }
    let floor = float.floor();
    if floor < -I64_BOUND {
        return Ordering::Greater;
    }
    if floor >= I64_BOUND {
        return Ordering::Less;
    }
    // In range, so the floor converts without loss. An integer equal to the
    // floor is below a fractional float and ties with an integral one.
    match i128::from(int).cmp(&(floor as i128)) {
        Ordering::Equal => Ordering::Less,
        ord => ord,
    }
}

/// Lexicographic; a proper prefix sorts first
fn compare_seq(x: &[RemoteValue], y: &[RemoteValue]) -> Ordering {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| compare(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| x.len().cmp(&y.len()))
}

/// Size first, then keys, then values
fn compare_maps(x: &TermMap, y: &TermMap) -> Ordering {
    x.len()
        .cmp(&y.len())
        .then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|((ka, _), (kb, _))| compare(ka, kb))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|((_, va), (_, vb))| compare(va, vb))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
}
