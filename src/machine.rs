use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use owo_colors::OwoColorize;

use crate::{
    math::{ordered_set, OrderedSet},
    prelude::*,
};

mod builder;
pub use builder::MachineBuilder;

mod run;

mod transition;
pub use transition::{FnTransition, Successor, TransitionFunction, TransitionTable};

/// An alphabet is a finite set of signals.
pub type Alphabet = OrderedSet<Symbol>;

/// A deterministic Mealy machine. It consists of an input and an output alphabet, a finite set
/// of states with a designated initial state and a transition function, which maps a state and
/// an input signal to a successor state and an output signal.
///
/// Machines are values. Operations like [`Machine::product`] or [`Machine::trim`] do not modify
/// their operands but produce new machines. The transition function is held behind an [`Arc`],
/// so cloning a machine is cheap and the clone shares the (immutable) transition behaviour.
///
/// Apart from the initial state, a machine has a cursor, the current state, which is only
/// used when the machine is driven step by step through [`Machine::step`]. Products, trimming
/// and equivalence checks always start from the initial state.
#[derive(Clone)]
pub struct Machine {
    input_alphabet: Alphabet,
    output_alphabet: Alphabet,
    states: OrderedSet<Symbol>,
    initial: Symbol,
    transition: Arc<dyn TransitionFunction>,
    current: Option<Symbol>,
}

impl Machine {
    /// Creates a new machine from its components. Fails with
    /// [`MachineError::UnknownInitialState`] if `initial` is not one of the `states`.
    ///
    /// The transition function is not checked for totality, since it may be an arbitrary
    /// behaviour. Use [`Machine::builder`] to construct a machine from an explicit table.
    pub fn new<I, O, Q, T>(
        inputs: I,
        outputs: O,
        states: Q,
        initial: Symbol,
        transition: T,
    ) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = Symbol>,
        O: IntoIterator<Item = Symbol>,
        Q: IntoIterator<Item = Symbol>,
        T: TransitionFunction + 'static,
    {
        let states = ordered_set(states);
        if !states.contains(&initial) {
            return Err(MachineError::UnknownInitialState(initial.label().to_string()));
        }
        Ok(Self::from_parts(
            ordered_set(inputs),
            ordered_set(outputs),
            states,
            initial,
            Arc::new(transition),
        ))
    }

    pub(crate) fn from_parts(
        input_alphabet: Alphabet,
        output_alphabet: Alphabet,
        states: OrderedSet<Symbol>,
        initial: Symbol,
        transition: Arc<dyn TransitionFunction>,
    ) -> Self {
        Self {
            input_alphabet,
            output_alphabet,
            states,
            initial,
            transition,
            current: None,
        }
    }

    /// Returns a [`MachineBuilder`] for assembling a table-backed machine.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::default()
    }

    /// Returns a reference to the input alphabet.
    pub fn input_alphabet(&self) -> &Alphabet {
        &self.input_alphabet
    }

    /// Returns a reference to the output alphabet.
    pub fn output_alphabet(&self) -> &Alphabet {
        &self.output_alphabet
    }

    /// Returns a reference to the set of states.
    pub fn states(&self) -> &OrderedSet<Symbol> {
        &self.states
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &Symbol {
        &self.initial
    }

    /// Returns the state the cursor points to, if the machine has been stepped or reset.
    pub fn current_state(&self) -> Option<&Symbol> {
        self.current.as_ref()
    }

    /// Evaluates the transition function on `state` and `input`, returning the reached state
    /// together with the emitted output.
    pub fn transition(&self, state: &Symbol, input: &Symbol) -> Result<Successor, MachineError> {
        self.transition.apply(state, input)
    }

    /// Replaces the set of states, keeping everything else.
    pub(crate) fn with_states(mut self, states: OrderedSet<Symbol>) -> Self {
        self.states = states;
        self
    }

    /// Returns a string representation of the transition table. There is one row per state and
    /// one column per input signal, each cell reads `target/output`. Cells for which the
    /// transition function fails show `-`. The initial state is marked with an arrow and, if
    /// `ansi` is set, highlighted in color.
    pub fn transition_table(&self, ansi: bool) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.input_alphabet.iter().map(|sym| sym.to_string())),
        );
        for state in &self.states {
            let mut row = vec![if state == &self.initial {
                let marked = format!("→ {state}");
                if ansi {
                    marked.cyan().bold().to_string()
                } else {
                    marked
                }
            } else {
                state.to_string()
            }];
            for sym in &self.input_alphabet {
                match self.transition(state, sym) {
                    Ok((target, output)) => row.push(format!("{target}/{output}")),
                    Err(_) => row.push("-".to_string()),
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table(false))
    }
}

impl Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("input_alphabet", &self.input_alphabet)
            .field("output_alphabet", &self.output_alphabet)
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
