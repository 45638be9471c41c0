use std::collections::VecDeque;

use crate::{
    math::{ordered_set, OrderedSet},
    prelude::*,
};

/// Type alias for a minimal representative of a state, which is its length-lexicographically
/// minimal access word together with the state itself.
pub type MinimalRepresentative = (Vec<Symbol>, Symbol);

/// Iterator over the minimal representatives of all states of a [`Machine`] that are reachable
/// from a given origin. States are explored breadth-first, visiting the inputs of every state
/// in the order of the input alphabet. A state is marked as seen when it is enqueued, so every
/// reachable state enters the queue exactly once and is yielded exactly once, after all of its
/// successors have been enqueued.
///
/// If the transition function fails, the error is yielded and the iteration stops.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    machine: &'a Machine,
    seen: OrderedSet<Symbol>,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the exploration of `machine` in the state `origin`.
    pub fn new(machine: &'a Machine, origin: Symbol) -> Self {
        let seen = ordered_set([origin.clone()]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self {
            machine,
            seen,
            queue,
        }
    }
}

impl Iterator for MinimalRepresentatives<'_> {
    type Item = Result<MinimalRepresentative, MachineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for sym in self.machine.input_alphabet() {
            let p = match self.machine.transition(&q, sym) {
                Ok((p, _)) => p,
                Err(e) => {
                    self.queue.clear();
                    return Some(Err(e));
                }
            };
            if !self.seen.contains(&p) {
                self.seen.insert(p.clone());
                let mut new_access = access.clone();
                new_access.push(sym.clone());
                self.queue.push_back((new_access, p));
            }
        }
        Some(Ok((access, q)))
    }
}

impl Machine {
    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from the initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, self.initial().clone())
    }

    /// Collects the set of states that are reachable from the initial state.
    pub fn reachable_states(&self) -> Result<OrderedSet<Symbol>, MachineError> {
        let mut reachable = OrderedSet::new();
        for rep in self.minimal_representatives() {
            reachable.insert(rep?.1);
        }
        Ok(reachable)
    }
}
