//! Saturation of the epsilon transition table.

use log::{debug, trace};

use crate::automaton::{Automaton, Symbol};
use crate::stateset::StateSet;

impl Automaton {
    /// Widens every state's epsilon destinations to everything reachable over one or more
    /// epsilon transitions. A state only ends up in its own set through an epsilon cycle.
    ///
    /// Repeats the all-pairs propagation until a full pass changes nothing, and returns the
    /// number of passes made.
    pub fn saturate_epsilon(&mut self) -> usize {
        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;
            for i in 0..self.state_count() {
                let eps_i = match self.targets(i, Symbol::Epsilon) {
                    Some(targets) => targets.clone(),
                    None => continue,
                };
                let mut widened = eps_i.clone();
                for j in eps_i.iter() {
                    if let Some(eps_j) = self.targets(j, Symbol::Epsilon) {
                        widened.union_with(eps_j);
                    }
                }
                if widened != eps_i {
                    trace!("pass {}: epsilon({}) = {:?}", passes, i, widened);
                    self.set_targets(i, Symbol::Epsilon, widened);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        debug!("epsilon table saturated after {} passes", passes);
        passes
    }

    /// The saturated epsilon destinations of every state, without touching `self`.
    pub fn epsilon_closures(&self) -> Vec<StateSet> {
        let mut saturated = self.clone();
        saturated.saturate_epsilon();
        (0..saturated.state_count())
            .map(|state| {
                saturated
                    .targets(state, Symbol::Epsilon)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }
}
