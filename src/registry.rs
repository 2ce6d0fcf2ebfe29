//! Capability registry: which token kinds a handler renders.

use std::collections::HashSet;
use std::hash::Hash;

/// Fixed set of token kinds, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry<K> {
    kinds: HashSet<K>,
}

impl<K: Copy + Eq + Hash> CapabilityRegistry<K> {
    pub fn new(kinds: impl IntoIterator<Item = K>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn supports(&self, kind: &K) -> bool {
        self.kinds.contains(kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.kinds.iter()
    }
}
