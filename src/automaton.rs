use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::stateset::{StateSet, MAX_STATES};

/// Every automaton starts in state 0.
pub const START: usize = 0;

/// An input symbol: one of the 256 byte values, or the empty string.
///
/// `Epsilon` sorts before every byte, so it comes first when iterating a state's transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Byte(u8),
}

impl Symbol {
    pub fn is_epsilon(self) -> bool {
        self == Symbol::Epsilon
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Epsilon => write!(f, "epsilon"),
            Symbol::Byte(b) => write!(f, "{:?}", b as char),
        }
    }
}

/// A finite automaton over bytes, possibly nondeterministic and with epsilon transitions.
///
/// A deterministic automaton is the special case where every destination set has at most one
/// member and no epsilon transitions exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    state_count: usize,
    accepting: StateSet,
    // state -> (symbol -> destinations); a missing symbol means no transition
    transitions: Vec<BTreeMap<Symbol, StateSet>>,
}

impl Automaton {
    pub fn new(state_count: usize) -> Result<Self> {
        if state_count == 0 {
            return Err(Error::NoStates);
        }
        if state_count > MAX_STATES {
            return Err(Error::TooManyStates {
                requested: state_count,
                limit: MAX_STATES,
            });
        }
        Ok(Automaton {
            state_count,
            accepting: StateSet::new(),
            transitions: vec![BTreeMap::new(); state_count],
        })
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if state < self.state_count {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                state,
                state_count: self.state_count,
            })
        }
    }

    pub fn mark_accepting(&mut self, state: usize) -> Result<&mut Self> {
        self.check_state(state)?;
        self.accepting.insert(state);
        Ok(self)
    }

    /// Adds `to` to the destinations of `from` on `symbol`; earlier destinations are kept.
    pub fn add_transition(&mut self, from: usize, symbol: Symbol, to: usize) -> Result<&mut Self> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.transitions[from]
            .entry(symbol)
            .or_insert_with(StateSet::new)
            .insert(to);
        Ok(self)
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(state)
    }

    /// Destinations of `state` on `symbol`, `None` when there are none.
    pub fn targets(&self, state: usize, symbol: Symbol) -> Option<&StateSet> {
        self.transitions[state]
            .get(&symbol)
            .filter(|targets| !targets.is_empty())
    }

    pub(crate) fn transitions_of(&self, state: usize) -> &BTreeMap<Symbol, StateSet> {
        &self.transitions[state]
    }

    pub(crate) fn set_targets(&mut self, state: usize, symbol: Symbol, targets: StateSet) {
        debug_assert!(targets.is_subset(&StateSet::full(self.state_count)));
        self.transitions[state].insert(symbol, targets);
    }

    /// The non-epsilon symbols used by any transition, in byte order.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.transitions
            .iter()
            .flat_map(|trans| trans.iter())
            .filter(|&(symbol, targets)| !symbol.is_epsilon() && !targets.is_empty())
            .map(|(&symbol, _)| symbol)
            .collect()
    }

    /// All `(source, symbol, destination)` triples, ordered by source, then symbol, then
    /// destination.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Symbol, usize)> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .flat_map(|(from, trans)| {
                trans
                    .iter()
                    .flat_map(move |(&symbol, targets)| targets.iter().map(move |to| (from, symbol, to)))
            })
    }

    /// No epsilon transitions, and at most one destination per state and symbol.
    pub fn is_deterministic(&self) -> bool {
        self.first_nondeterminism().is_none()
    }

    pub(crate) fn first_nondeterminism(&self) -> Option<(usize, Symbol)> {
        self.transitions.iter().enumerate().find_map(|(state, trans)| {
            trans
                .iter()
                .find(|&(symbol, targets)| {
                    !targets.is_empty() && (symbol.is_epsilon() || targets.len() > 1)
                })
                .map(|(&symbol, _)| (state, symbol))
        })
    }

    /// `states` together with everything reachable from them over epsilon transitions.
    ///
    /// Unlike the saturated epsilon table this includes the given states themselves.
    pub fn epsilon_reach(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        let mut stack: Vec<usize> = states.iter().collect();
        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }
            if let Some(targets) = self.targets(state, Symbol::Epsilon) {
                stack.extend(targets.iter().filter(|&t| !closure.contains(t)));
            }
        }
        closure
    }

    /// The set of states the automaton is in before reading any input.
    pub fn start(&self) -> StateSet {
        self.epsilon_reach(&StateSet::singleton(START))
    }

    /// Moves every state in `states` over `byte`, then follows epsilon transitions.
    pub fn step(&self, states: &StateSet, byte: u8) -> StateSet {
        let mut next = StateSet::new();
        for state in states.iter() {
            if let Some(targets) = self.targets(state, Symbol::Byte(byte)) {
                next.union_with(targets);
            }
        }
        self.epsilon_reach(&next)
    }

    pub fn accepts<I: AsRef<[u8]>>(&self, input: I) -> bool {
        let mut cur_states = self.start();
        for &byte in input.as_ref() {
            cur_states = self.step(&cur_states, byte);

            // stuck
            if cur_states.is_empty() {
                return false;
            }
        }
        cur_states.intersects(&self.accepting)
    }
}
