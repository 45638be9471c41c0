use std::sync::Arc;

use tracing::trace;

use crate::{
    error::SymbolRole,
    math::{ordered_set, OrderedSet},
    prelude::*,
};

/// Helper struct for the construction of table-backed [`Machine`]s. Transitions are given as
/// tuples `(source, input, output, target)`.
///
/// States, input and output signals can be declared explicitly. A set that has been declared
/// is checked, meaning a transition that mentions an undeclared symbol is rejected. A set that
/// is left empty is instead inferred from the transitions. In any case, the resulting table
/// has to be total, i.e. every state must have a transition for every input signal.
///
/// # Example
/// ```
/// use mealy::prelude::*;
///
/// let mm = Machine::builder()
///     .with_inputs(["a", "b"])
///     .with_outputs(["0", "1"])
///     .with_initial("q0")
///     .with_transitions([
///         ("q0", "a", "0", "q1"),
///         ("q0", "b", "1", "q0"),
///         ("q1", "a", "1", "q0"),
///         ("q1", "b", "0", "q1"),
///     ])
///     .into_machine()
///     .unwrap();
/// assert_eq!(mm.size(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MachineBuilder {
    inputs: Vec<Symbol>,
    outputs: Vec<Symbol>,
    states: Vec<Symbol>,
    initial: Option<Symbol>,
    transitions: Vec<(Symbol, Symbol, Symbol, Symbol)>,
}

impl MachineBuilder {
    /// Declares the input alphabet.
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Declares the output alphabet.
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.outputs.extend(outputs.into_iter().map(Into::into));
        self
    }

    /// Declares the set of states.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Sets the initial state.
    pub fn with_initial<S: Into<Symbol>>(mut self, initial: S) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Adds transitions, each given as `(source, input, output, target)`.
    pub fn with_transitions<I, Q, A, O>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (Q, A, O, Q)>,
        Q: Into<Symbol>,
        A: Into<Symbol>,
        O: Into<Symbol>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(q, a, o, p)| (q.into(), a.into(), o.into(), p.into())),
        );
        self
    }

    /// Consumes the builder and produces a machine backed by a [`TransitionTable`].
    pub fn into_machine(self) -> Result<Machine, MachineError> {
        let mut states = Declared::new(self.states, SymbolRole::State);
        let mut inputs = Declared::new(self.inputs, SymbolRole::Input);
        let mut outputs = Declared::new(self.outputs, SymbolRole::Output);

        let mut table = TransitionTable::new();
        for (source, input, output, target) in self.transitions {
            states.admit(&source)?;
            states.admit(&target)?;
            inputs.admit(&input)?;
            outputs.admit(&output)?;

            let successor = (target, output);
            if let Some(previous) =
                table.insert(&source, &input, successor.0.clone(), successor.1.clone())
            {
                if previous != successor {
                    return Err(MachineError::Nondeterministic {
                        state: source.label().to_string(),
                        input: input.label().to_string(),
                    });
                }
            }
        }

        let initial = self.initial.ok_or(MachineError::MissingInitialState)?;
        if !states.symbols.contains(&initial) {
            if states.strict {
                return Err(MachineError::UnknownInitialState(initial.label().to_string()));
            }
            states.symbols.insert(initial.clone());
        }

        for state in &states.symbols {
            for input in &inputs.symbols {
                if table.get(state, input).is_none() {
                    return Err(MachineError::MissingTransition {
                        state: state.label().to_string(),
                        input: input.label().to_string(),
                    });
                }
            }
        }

        trace!(
            "built machine with {} states and {} transitions",
            states.symbols.len(),
            table.len()
        );
        Ok(Machine::from_parts(
            inputs.symbols,
            outputs.symbols,
            states.symbols,
            initial,
            Arc::new(table),
        ))
    }
}

/// A set of symbols that is either fixed up front or grows as symbols are encountered.
struct Declared {
    symbols: OrderedSet<Symbol>,
    strict: bool,
    role: SymbolRole,
}

impl Declared {
    fn new(declared: Vec<Symbol>, role: SymbolRole) -> Self {
        Self {
            strict: !declared.is_empty(),
            symbols: ordered_set(declared),
            role,
        }
    }

    fn admit(&mut self, symbol: &Symbol) -> Result<(), MachineError> {
        if self.symbols.contains(symbol) {
            return Ok(());
        }
        if self.strict {
            return Err(MachineError::UnknownSymbol {
                label: symbol.label().to_string(),
                role: self.role,
            });
        }
        self.symbols.insert(symbol.clone());
        Ok(())
    }
}
