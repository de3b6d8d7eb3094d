//! Remote value representation
//!
//! This module defines the [`RemoteValue`] enum, the immutable tagged value the
//! debugger receives for a variable. Equality is structural: two values are
//! equal when their wire content is equal.
//!
//! # Value Types
//!
//! - [`RemoteValue::Atom`]: interned-style name (`ok`, `'Hello world'`)
//! - [`RemoteValue::Integer`] / [`RemoteValue::Float`]: numbers
//! - [`RemoteValue::List`] / [`RemoteValue::Tuple`]: ordered containers
//! - [`RemoteValue::Map`]: key/value container kept in canonical key order
//! - [`RemoteValue::Binary`]: byte sequence
//! - [`RemoteValue::Pid`], [`RemoteValue::Port`], [`RemoteValue::Reference`],
//!   [`RemoteValue::Fun`]: opaque handles into the remote runtime

use super::order::compare;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Atom name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn new(name: &str) -> Self {
        Atom(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Atom::new(name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::render::write_atom(f, self.as_str())
    }
}

/// Process identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pid {
    pub node: Atom,
    pub id: u32,
    pub serial: u32,
    pub creation: u32,
}

/// Port identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub node: Atom,
    pub id: u64,
}

/// Reference (`make_ref/0` result)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub node: Atom,
    pub ids: Arc<[u32]>,
}

/// Closure handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fun {
    pub module: Atom,
    pub index: u32,
    pub uniq: u32,
}

/// Map entries sorted by canonical key order, one entry per key.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMap {
    entries: Arc<[(RemoteValue, RemoteValue)]>,
}

impl TermMap {
    /// Build a map from entries in any order.
    ///
    /// Duplicate keys collapse to the entry that came last, as a map literal
    /// evaluated by the runtime would.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RemoteValue, RemoteValue)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        // Stable: among equal keys, insertion order is kept
        entries.sort_by(|a, b| compare(&a.0, &b.0));

        let mut unique: Vec<(RemoteValue, RemoteValue)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match unique.last_mut() {
                Some(last) if compare(&last.0, &key) == Ordering::Equal => *last = (key, value),
                _ => unique.push((key, value)),
            }
        }

        TermMap {
            entries: unique.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` in canonical key order
    pub fn entry(&self, index: usize) -> Option<&(RemoteValue, RemoteValue)> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RemoteValue, RemoteValue)> {
        self.entries.iter()
    }

    /// Look up a value by key (binary search over the sorted entries)
    pub fn get(&self, key: &RemoteValue) -> Option<&RemoteValue> {
        self.entries
            .binary_search_by(|(k, _)| compare(k, key))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }
}

/// Values received from the remote runtime
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteValue {
    Atom(Atom),
    Integer(i64),
    Float(f64),
    List(Arc<[RemoteValue]>),
    Tuple(Arc<[RemoteValue]>),
    Map(TermMap),
    Binary(Arc<[u8]>),
    Pid(Pid),
    Port(Port),
    Reference(Reference),
    Fun(Fun),
}

impl RemoteValue {
    pub fn atom(name: &str) -> Self {
        RemoteValue::Atom(Atom::new(name))
    }

    pub fn list(elements: Vec<RemoteValue>) -> Self {
        RemoteValue::List(elements.into())
    }

    pub fn tuple(elements: Vec<RemoteValue>) -> Self {
        RemoteValue::Tuple(elements.into())
    }

    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RemoteValue, RemoteValue)>,
    {
        RemoteValue::Map(TermMap::from_entries(entries))
    }

    pub fn binary(bytes: &[u8]) -> Self {
        RemoteValue::Binary(Arc::from(bytes))
    }

    /// UTF-8 binary, the runtime representation of an Elixir string
    pub fn string(text: &str) -> Self {
        RemoteValue::binary(text.as_bytes())
    }

    /// Short variant name
    pub fn type_name(&self) -> &'static str {
        match self {
            RemoteValue::Atom(_) => "atom",
            RemoteValue::Integer(_) => "integer",
            RemoteValue::Float(_) => "float",
            RemoteValue::List(_) => "list",
            RemoteValue::Tuple(_) => "tuple",
            RemoteValue::Map(_) => "map",
            RemoteValue::Binary(_) => "binary",
            RemoteValue::Pid(_) => "pid",
            RemoteValue::Port(_) => "port",
            RemoteValue::Reference(_) => "reference",
            RemoteValue::Fun(_) => "fun",
        }
    }

    /// Get the atom, returns None if not an Atom
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            RemoteValue::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Module name of an Elixir struct (`%URI{}` yields `URI`)
    ///
    /// A struct is a map whose `__struct__` key holds the module atom.
    pub fn struct_name(&self) -> Option<&str> {
        let RemoteValue::Map(map) = self else {
            return None;
        };
        let module = map.get(&RemoteValue::atom("__struct__"))?.as_atom()?;
        let name = module.as_str();
        Some(name.strip_prefix("Elixir.").unwrap_or(name))
    }
}

impl From<i64> for RemoteValue {
    fn from(n: i64) -> Self {
        RemoteValue::Integer(n)
    }
}

impl From<f64> for RemoteValue {
    fn from(x: f64) -> Self {
        RemoteValue::Float(x)
    }
}

impl From<Atom> for RemoteValue {
    fn from(atom: Atom) -> Self {
        RemoteValue::Atom(atom)
    }
}
