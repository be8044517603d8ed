//! Capture environments produced by matching.

use rustc_hash::FxHashMap;
use std::fmt;
use templar_core::{Expr, Sym};

/// The value bound to one capture name.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// A single node, from a wildcard or typed wildcard.
    One(Expr),
    /// A run of sibling nodes, from a slurp. May be empty.
    Many(Vec<Expr>),
}

impl Binding {
    /// The node, if this is a single binding.
    #[inline]
    #[must_use]
    pub const fn as_one(&self) -> Option<&Expr> {
        match self {
            Self::One(e) => Some(e),
            Self::Many(_) => None,
        }
    }

    /// The run, if this is a sequence binding.
    #[inline]
    #[must_use]
    pub fn as_many(&self) -> Option<&[Expr]> {
        match self {
            Self::Many(es) => Some(es),
            Self::One(_) => None,
        }
    }
}

/// A set of name-to-value bindings from one successful match.
///
/// Environments are values: every match attempt starts from an empty one,
/// sub-match results merge with [`Bindings::merge`], and a merge that
/// would rebind a name to a structurally different value fails the whole
/// match. Nothing is shared or mutated across attempts.
#[derive(Clone, Default, PartialEq)]
pub struct Bindings {
    map: FxHashMap<Sym, Binding>,
}

impl Bindings {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no names are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    /// Look up a single-node binding by name.
    #[must_use]
    pub fn expr(&self, name: &str) -> Option<&Expr> {
        self.get(name).and_then(Binding::as_one)
    }

    /// Look up a sequence binding by name.
    #[must_use]
    pub fn seq(&self, name: &str) -> Option<&[Expr]> {
        self.get(name).and_then(Binding::as_many)
    }

    /// Whether a name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Bind `name` to `value`.
    ///
    /// Returns `false` on conflict: the name is already bound to a
    /// structurally different value. Rebinding to an equal value is fine.
    pub fn bind(&mut self, name: Sym, value: Binding) -> bool {
        match self.map.get(&name) {
            Some(existing) => *existing == value,
            None => {
                self.map.insert(name, value);
                true
            }
        }
    }

    /// Merge another environment into this one.
    ///
    /// `None` on any conflicting name, which makes the enclosing match
    /// fail rather than error.
    #[must_use]
    pub fn merge(mut self, other: Bindings) -> Option<Bindings> {
        for (name, value) in other.map {
            if !self.bind(name, value) {
                return None;
            }
        }
        Some(self)
    }

    /// Iterate over bound names and values, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sym, &Binding)> {
        self.map.iter()
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.map.iter().collect();
        entries.sort_by_key(|&(name, _)| name.as_str());
        f.debug_map()
            .entries(entries.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a Sym, &'a Binding);
    type IntoIter = std::collections::hash_map::Iter<'a, Sym, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
