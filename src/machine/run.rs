use std::borrow::Borrow;

use tracing::trace;

use crate::prelude::*;

impl Machine {
    /// Feeds a single input to the machine, advancing the current state and returning the
    /// emitted output. If the machine has not been stepped before, it starts in its initial state.
    pub fn step(&mut self, input: &Symbol) -> Result<Symbol, MachineError> {
        let state = self.current.as_ref().unwrap_or(&self.initial);
        let (target, output) = self.transition(state, input)?;
        trace!("{state} --{input}/{output}--> {target}");
        self.current = Some(target);
        Ok(output)
    }

    /// Moves the current state back to the initial state.
    pub fn reset(&mut self) {
        self.current = Some(self.initial.clone());
    }

    /// Runs `word` from the initial state and returns the sequence of emitted outputs, one for
    /// each input. The current state is not touched.
    pub fn run<W>(&self, word: W) -> Result<Vec<Symbol>, MachineError>
    where
        W: IntoIterator,
        W::Item: Borrow<Symbol>,
    {
        let mut state = self.initial.clone();
        let mut outputs = vec![];
        for input in word {
            let (target, output) = self.transition(&state, input.borrow())?;
            outputs.push(output);
            state = target;
        }
        Ok(outputs)
    }

    /// Runs `word` from the initial state and returns the state that is reached.
    pub fn reached_state<W>(&self, word: W) -> Result<Symbol, MachineError>
    where
        W: IntoIterator,
        W::Item: Borrow<Symbol>,
    {
        word.into_iter().try_fold(self.initial.clone(), |state, input| {
            self.transition(&state, input.borrow()).map(|(target, _)| target)
        })
    }

    /// Returns the output that is emitted on the last transition of the run on `word`, or `None`
    /// if `word` is empty, as no transition is taken in that case.
    pub fn output_of<W>(&self, word: W) -> Result<Option<Symbol>, MachineError>
    where
        W: IntoIterator,
        W::Item: Borrow<Symbol>,
    {
        Ok(self.run(word)?.pop())
    }
}
