//! Child enumeration
//!
//! Every value falls into one of three [`VariantKind`]s. Each kind owns an
//! [`Enumerator`] entry in a static table holding its child count, child
//! accessor and icon, so adding a variant means bucketing it in
//! [`VariantKind::of`], not writing new dispatch code.
//!
//! Counts are answered from the already-known shallow structure in O(1); the
//! k-th child is produced without materializing its siblings.

use super::errors::{InspectError, InspectResult};
use super::presenter::Icon;
use crate::term::RemoteValue;

/// A child as the host sees it: a row label and the child's value
#[derive(Debug, Clone, PartialEq)]
pub struct ChildEntry {
    pub label: String,
    pub value: RemoteValue,
}

impl ChildEntry {
    /// Entry of an ordered container, labelled `[1]`, `[2]`, ... from a 0-based index
    pub fn indexed(index: usize, value: RemoteValue) -> Self {
        ChildEntry {
            label: format!("[{}]", index + 1),
            value,
        }
    }

    /// Entry of a keyed container, labelled with the key or field name
    pub fn named(label: impl Into<String>, value: RemoteValue) -> Self {
        ChildEntry {
            label: label.into(),
            value,
        }
    }
}

/// Per-kind behavior table entry
pub struct Enumerator {
    pub child_count: fn(&RemoteValue) -> usize,
    pub child_at: fn(&RemoteValue, usize) -> InspectResult<ChildEntry>,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// No children
    Primitive,
    /// Ordered children labelled by 1-based position
    ArrayLike,
    /// Children labelled by key, in canonical key order
    GenericContainer,
}

static ENUMERATORS: [Enumerator; 3] = [
    Enumerator {
        child_count: primitive_count,
        child_at: primitive_child,
        icon: Icon::PrimitiveValue,
    },
    Enumerator {
        child_count: array_count,
        child_at: array_child,
        icon: Icon::Array,
    },
    Enumerator {
        child_count: container_count,
        child_at: container_child,
        icon: Icon::Value,
    },
];

impl VariantKind {
    pub fn of(value: &RemoteValue) -> Self {
        match value {
            RemoteValue::Atom(_)
            | RemoteValue::Integer(_)
            | RemoteValue::Float(_)
            | RemoteValue::Pid(_)
            | RemoteValue::Port(_)
            | RemoteValue::Reference(_)
            | RemoteValue::Fun(_) => VariantKind::Primitive,
            RemoteValue::List(_) | RemoteValue::Tuple(_) | RemoteValue::Binary(_) => {
                VariantKind::ArrayLike
            }
            RemoteValue::Map(_) => VariantKind::GenericContainer,
        }
    }

    pub fn enumerator(self) -> &'static Enumerator {
        match self {
            VariantKind::Primitive => &ENUMERATORS[0],
            VariantKind::ArrayLike => &ENUMERATORS[1],
            VariantKind::GenericContainer => &ENUMERATORS[2],
        }
    }
}

/// Number of children of `value`
pub fn child_count(value: &RemoteValue) -> usize {
    (VariantKind::of(value).enumerator().child_count)(value)
}

/// The child of `value` at `index`, for `index < child_count(value)`
pub fn child_at(value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
    (VariantKind::of(value).enumerator().child_at)(value, index)
}

fn out_of_range(value: &RemoteValue, index: usize) -> InspectError {
    InspectError::OutOfRange {
        index,
        count: child_count(value),
    }
}

fn primitive_count(_value: &RemoteValue) -> usize {
    0
}

fn primitive_child(value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
    Err(out_of_range(value, index))
}

fn array_count(value: &RemoteValue) -> usize {
    match value {
        RemoteValue::List(elements) | RemoteValue::Tuple(elements) => elements.len(),
        RemoteValue::Binary(bytes) => bytes.len(),
        _ => 0,
    }
}

fn array_child(value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
    let child = match value {
        RemoteValue::List(elements) | RemoteValue::Tuple(elements) => elements.get(index).cloned(),
        RemoteValue::Binary(bytes) => bytes
            .get(index)
            .map(|byte| RemoteValue::Integer(i64::from(*byte))),
        _ => None,
    };
    child
        .map(|child| ChildEntry::indexed(index, child))
        .ok_or_else(|| out_of_range(value, index))
}

fn container_count(value: &RemoteValue) -> usize {
    match value {
        RemoteValue::Map(map) => map.len(),
        _ => 0,
    }
}

fn container_child(value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
    let entry = match value {
        RemoteValue::Map(map) => map.entry(index),
        _ => None,
    };
    entry
        .map(|(key, child)| ChildEntry::named(key.to_string(), child.clone()))
        .ok_or_else(|| out_of_range(value, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(value: &RemoteValue) -> Vec<String> {
        (0..child_count(value))
            .map(|i| child_at(value, i).unwrap().label)
            .collect()
    }

    #[test]
    fn test_primitive_has_no_children() {
        let value = RemoteValue::atom("ok");
        assert_eq!(VariantKind::of(&value), VariantKind::Primitive);
        assert_eq!(child_count(&value), 0);
        assert_eq!(
            child_at(&value, 0),
            Err(InspectError::OutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_tuple_children_are_indexed_from_one() {
        let value = RemoteValue::tuple(vec![RemoteValue::atom("ok"), RemoteValue::Integer(5)]);
        assert_eq!(labels(&value), vec!["[1]", "[2]"]);
        assert_eq!(child_at(&value, 1).unwrap().value, RemoteValue::Integer(5));
        assert_eq!(
            child_at(&value, 2),
            Err(InspectError::OutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_binary_children_are_bytes() {
        let value = RemoteValue::string("hi");
        assert_eq!(child_count(&value), 2);
        assert_eq!(
            child_at(&value, 0).unwrap(),
            ChildEntry::indexed(0, RemoteValue::Integer(104))
        );
    }

    #[test]
    fn test_map_children_follow_key_order() {
        let value = RemoteValue::map(vec![
            (RemoteValue::atom("b"), RemoteValue::Integer(2)),
            (RemoteValue::string("k"), RemoteValue::Integer(3)),
            (RemoteValue::Integer(1), RemoteValue::atom("x")),
            (RemoteValue::atom("a"), RemoteValue::Integer(1)),
        ]);
        assert_eq!(labels(&value), vec!["1", "a", "b", "<<\"k\">>"]);
        assert_eq!(labels(&value), labels(&value.clone()));
    }
}
