use std::collections::HashMap;

use log::{debug, trace};

use crate::automaton::{Automaton, START};
use crate::error::{Error, Result};
use crate::stateset::{StateSet, MAX_STATES};

/// The result of a powerset construction: the DFA, and for every DFA state the set of NFA
/// states it stands for.
#[derive(Clone, Debug)]
pub struct Determinized {
    pub dfa: Automaton,
    pub subsets: Vec<StateSet>,
}

impl Automaton {
    /// Subset construction. DFA state 0 stands for the start state and its epsilon closure;
    /// every other DFA state is a distinct non-empty set of NFA states reachable from it.
    ///
    /// DFA states are numbered in discovery order. A set that would need more than
    /// `MAX_STATES` DFA states fails with `Error::TooManyStates`.
    pub fn powerset_construction(&self) -> Result<Determinized> {
        let alphabet = self.alphabet();

        let mut subsets = vec![self.start()];
        let mut subsets_map: HashMap<StateSet, usize> = HashMap::new();
        subsets_map.insert(subsets[START].clone(), START);

        // (from, symbol, to) in terms of DFA state numbers
        let mut transitions = Vec::new();

        let mut cur_num = 0;
        while cur_num < subsets.len() {
            for &symbol in &alphabet {
                let mut nxt_states = StateSet::new();
                for state in subsets[cur_num].iter() {
                    if let Some(targets) = self.targets(state, symbol) {
                        nxt_states.union_with(targets);
                    }
                }

                // no transition
                if nxt_states.is_empty() {
                    continue;
                }
                let nxt_states = self.epsilon_reach(&nxt_states);

                let nxt_num = match subsets_map.get(&nxt_states) {
                    Some(&num) => num,
                    None => {
                        let num = subsets.len();
                        if num == MAX_STATES {
                            return Err(Error::TooManyStates {
                                requested: num + 1,
                                limit: MAX_STATES,
                            });
                        }
                        trace!("subset {} = {:?}", num, nxt_states);
                        subsets_map.insert(nxt_states.clone(), num);
                        subsets.push(nxt_states);
                        num
                    }
                };
                transitions.push((cur_num, symbol, nxt_num));
            }
            cur_num += 1;
        }

        let mut dfa = Automaton::new(subsets.len())?;
        for (num, subset) in subsets.iter().enumerate() {
            if subset.intersects(self.accepting()) {
                dfa.mark_accepting(num)?;
            }
        }
        for (from, symbol, to) in transitions {
            dfa.add_transition(from, symbol, to)?;
        }

        debug!(
            "powerset construction: {} NFA states -> {} DFA states",
            self.state_count(),
            subsets.len()
        );
        Ok(Determinized { dfa, subsets })
    }

    /// Subset construction, keeping only the resulting DFA.
    pub fn determinize(&self) -> Result<Automaton> {
        self.powerset_construction().map(|det| det.dfa)
    }
}
