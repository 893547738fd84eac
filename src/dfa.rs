use std::collections::HashSet;

use log::{debug, trace};

use crate::automaton::{Automaton, Symbol, START};
use crate::error::{Error, Result};
use crate::stateset::{StateSet, MAX_STATES};

/// How the accepting states are split up before refinement starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Seeding {
    /// One block of accepting states and one of non-accepting states.
    #[default]
    Standard,
    /// Every accepting state starts in a block of its own, so no two accepting states are
    /// ever merged.
    SplitAccepting,
}

#[derive(Clone, Debug, Default)]
pub struct MinimizeOptions {
    pub seeding: Seeding,
}

impl Automaton {
    /// Minimizes a deterministic automaton with the default options.
    pub fn minimize(&self) -> Result<Automaton> {
        self.minimize_with(&MinimizeOptions::default())
    }

    /// Partition refinement.
    ///
    /// States that are unreachable, or from which no accepting state can be reached, are dropped
    /// first (state 0 always stays). The remaining states are split until every block agrees, for
    /// every symbol, on the block its members move to. Each block becomes one state; the block
    /// holding state 0 is the new state 0.
    pub fn minimize_with(&self, options: &MinimizeOptions) -> Result<Automaton> {
        if let Some((state, symbol)) = self.first_nondeterminism() {
            return Err(Error::Nondeterministic { state, symbol });
        }

        let alphabet: Vec<Symbol> = self.alphabet().into_iter().collect();
        let useful = self.useful_states();
        let mut live = useful.clone();
        live.insert(START);

        let accepting = live.intersection(self.accepting());
        let rejecting = live.difference(self.accepting());
        let seeds: Vec<StateSet> = match options.seeding {
            Seeding::Standard => vec![accepting, rejecting],
            Seeding::SplitAccepting => accepting
                .iter()
                .map(StateSet::singleton)
                .chain(Some(rejecting))
                .collect(),
        };

        let mut partition: Vec<StateSet> = seeds.into_iter().filter(|b| !b.is_empty()).collect();
        let mut seen: HashSet<StateSet> = partition.iter().cloned().collect();
        let mut worklist: Vec<StateSet> = partition.clone();

        while let Some(splitter) = worklist.pop() {
            for &symbol in &alphabet {
                let predecessors = self.predecessors(&live, &splitter.intersection(&useful), symbol);
                if predecessors.is_empty() {
                    continue;
                }

                let mut idx = 0;
                while idx < partition.len() {
                    let inside = partition[idx].intersection(&predecessors);
                    let outside = partition[idx].difference(&predecessors);
                    if !inside.is_empty() && !outside.is_empty() {
                        // blocks are disjoint subsets of `live`
                        debug_assert!(partition.len() < MAX_STATES);
                        trace!("{:?} splits {:?} on {}", splitter, partition[idx], symbol);
                        for half in [&inside, &outside] {
                            if seen.insert(half.clone()) {
                                worklist.push(half.clone());
                            }
                        }
                        partition[idx] = inside;
                        partition.push(outside);
                    }
                    idx += 1;
                }
            }
        }

        partition.sort_by_key(|block| block.min());
        debug!(
            "partition refinement: {} states -> {} blocks",
            self.state_count(),
            partition.len()
        );
        self.quotient(&partition, &useful)
    }

    /// States reachable from the start state that can also reach an accepting state.
    fn useful_states(&self) -> StateSet {
        let mut reachable = StateSet::singleton(START);
        let mut worklist = vec![START];
        while let Some(state) = worklist.pop() {
            for targets in self.transitions_of(state).values() {
                for to in targets.iter() {
                    if reachable.insert(to) {
                        worklist.push(to);
                    }
                }
            }
        }

        // backwards from the accepting states
        let mut productive = self.accepting().clone();
        let mut changed = true;
        while changed {
            changed = false;
            for state in reachable.iter() {
                if productive.contains(state) {
                    continue;
                }
                if self
                    .transitions_of(state)
                    .values()
                    .any(|targets| targets.intersects(&productive))
                {
                    productive.insert(state);
                    changed = true;
                }
            }
        }

        reachable.intersection(&productive)
    }

    /// `{j in live : delta(j, symbol) in splitter}`
    fn predecessors(&self, live: &StateSet, splitter: &StateSet, symbol: Symbol) -> StateSet {
        live.iter()
            .filter(|&j| {
                self.targets(j, symbol)
                    .map_or(false, |targets| targets.intersects(splitter))
            })
            .collect()
    }

    /// One state per block. A block accepts if any of its members does, and moves on a symbol
    /// to the blocks of its members' useful destinations.
    fn quotient(&self, partition: &[StateSet], useful: &StateSet) -> Result<Automaton> {
        let mut block_of = vec![None; self.state_count()];
        for (idx, block) in partition.iter().enumerate() {
            for state in block.iter() {
                block_of[state] = Some(idx);
            }
        }

        let mut minimized = Automaton::new(partition.len())?;
        for (idx, block) in partition.iter().enumerate() {
            if block.intersects(self.accepting()) {
                minimized.mark_accepting(idx)?;
            }
            for state in block.iter() {
                for (&symbol, targets) in self.transitions_of(state) {
                    for to in targets.iter().filter(|&to| useful.contains(to)) {
                        if let Some(to_block) = block_of[to] {
                            minimized.add_transition(idx, symbol, to_block)?;
                        }
                    }
                }
            }
        }
        Ok(minimized)
    }
}
