use std::fmt;
use std::iter::FromIterator;

use bit_set::BitSet;
use bit_vec::BitVec;

/// Upper bound on the number of states any automaton in this crate can have.
pub const MAX_STATES: usize = 64;

/// A set of state numbers in `0..MAX_STATES`.
///
/// Sets are compared and hashed by their members, so two sets built in different ways are
/// equal whenever they contain the same states.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: BitSet,
}

impl StateSet {
    pub fn new() -> Self {
        StateSet {
            bits: BitSet::with_capacity(MAX_STATES),
        }
    }

    pub fn singleton(state: usize) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// The set `{0 .. n-1}`.
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_STATES, "{} states exceed the maximum of {}", n, MAX_STATES);
        StateSet {
            bits: BitSet::from_bit_vec(BitVec::from_fn(MAX_STATES, |i| i < n)),
        }
    }

    /// Returns `true` if the state was not yet a member.
    pub fn insert(&mut self, state: usize) -> bool {
        assert!(state < MAX_STATES, "state {} exceeds the maximum of {}", state, MAX_STATES);
        self.bits.insert(state)
    }

    #[inline]
    pub fn contains(&self, state: usize) -> bool {
        self.bits.contains(state)
    }

    #[inline]
    pub fn union_with(&mut self, other: &StateSet) {
        self.bits.union_with(&other.bits);
    }

    #[inline]
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.intersect_with(&other.bits);
        result
    }

    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Smallest member, if any.
    pub fn min(&self) -> Option<usize> {
        self.bits.iter().next()
    }

    /// Members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter()
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for StateSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = StateSet::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
