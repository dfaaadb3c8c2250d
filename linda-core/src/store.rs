//! Tuple storage backends
//!
//! This module defines the `TupleStore` trait for the multiset of
//! resident tuples and provides `VecStore`, an insertion-ordered
//! implementation. Stores do no locking of their own; the space
//! serializes every access under its engine lock.

use linda_types::{Template, Tuple};

/// Trait for tuple storage backends
pub trait TupleStore: Send {
    /// Add a tuple to the multiset
    fn insert(&mut self, tuple: Tuple);

    /// Remove and return the first tuple matching the template
    fn remove_first_match(&mut self, template: &Template) -> Option<Tuple>;

    /// Copy of the first tuple matching the template, left resident
    fn first_match(&self, template: &Template) -> Option<Tuple>;

    /// Copies of every matching tuple, in store order
    fn matching(&self, template: &Template) -> Vec<Tuple>;

    /// Iterate over all resident tuples
    fn iter(&self) -> Box<dyn Iterator<Item = &Tuple> + '_>;

    /// Number of resident tuples
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered tuple store
///
/// Scans are linear and deterministic: the first match is always the
/// oldest resident tuple that satisfies the template.
#[derive(Debug, Clone, Default)]
pub struct VecStore {
    tuples: Vec<Tuple>,
}

impl VecStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TupleStore for VecStore {
    fn insert(&mut self, tuple: Tuple) {
        self.tuples.push(tuple);
    }

    fn remove_first_match(&mut self, template: &Template) -> Option<Tuple> {
        let index = self.tuples.iter().position(|t| t.matches(template))?;
        Some(self.tuples.remove(index))
    }

    fn first_match(&self, template: &Template) -> Option<Tuple> {
        self.tuples.iter().find(|t| t.matches(template)).cloned()
    }

    fn matching(&self, template: &Template) -> Vec<Tuple> {
        self.tuples
            .iter()
            .filter(|t| t.matches(template))
            .cloned()
            .collect()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Tuple> + '_> {
        Box::new(self.tuples.iter())
    }

    fn len(&self) -> usize {
        self.tuples.len()
    }
}
