use std::fmt::Debug;

use crate::{math::Map, prelude::*};

/// The result of taking a transition, consisting of the reached state and the emitted output.
pub type Successor = (Symbol, Symbol);

/// Abstracts the transition function of a [`Machine`]. Given a state and an input signal it
/// produces the [`Successor`], that is the target state together with the emitted output.
///
/// Implementations must be total over the states and input alphabet of the machine that
/// holds them. Queries outside of that domain violate the contract of a machine, they are
/// answered with an error (usually [`MachineError::MissingTransition`]) and never silently
/// with some default.
pub trait TransitionFunction: Send + Sync {
    /// Computes the successor of `state` on `input`.
    fn apply(&self, state: &Symbol, input: &Symbol) -> Result<Successor, MachineError>;
}

/// A transition function that is backed by an explicit table, keyed first by the label of the
/// state and then by the label of the input. Machines that are built by hand, drawn at random
/// or decoded from JSON are all table-backed.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rows: Map<String, Map<String, Successor>>,
}

impl TransitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the transition from `state` on `input` to `target` emitting `output`. Returns
    /// the previously stored successor, if there was one.
    pub fn insert(
        &mut self,
        state: &Symbol,
        input: &Symbol,
        target: Symbol,
        output: Symbol,
    ) -> Option<Successor> {
        self.rows
            .entry(state.label().to_string())
            .or_default()
            .insert(input.label().to_string(), (target, output))
    }

    /// Looks up the successor of `state` on `input`.
    pub fn get(&self, state: &Symbol, input: &Symbol) -> Option<&Successor> {
        self.rows.get(state.label())?.get(input.label())
    }

    /// Returns the number of transitions stored in the table.
    pub fn len(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    /// Returns true if the table holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransitionFunction for TransitionTable {
    fn apply(&self, state: &Symbol, input: &Symbol) -> Result<Successor, MachineError> {
        self.get(state, input)
            .cloned()
            .ok_or_else(|| MachineError::MissingTransition {
                state: state.label().to_string(),
                input: input.label().to_string(),
            })
    }
}

/// Wraps a closure so that it can be used as the transition function of a [`Machine`].
///
/// # Example
/// ```
/// use mealy::prelude::*;
///
/// let parity = FnTransition(|state: &Symbol, input: &Symbol| {
///     let target = match (state.label(), input.label()) {
///         ("even", "1") | ("odd", "0") => "odd",
///         _ => "even",
///     };
///     Ok::<_, MachineError>((Symbol::leaf(target), Symbol::leaf(target)))
/// });
/// let machine = Machine::new(
///     ["0", "1"].map(Symbol::leaf),
///     ["even", "odd"].map(Symbol::leaf),
///     ["even", "odd"].map(Symbol::leaf),
///     Symbol::leaf("even"),
///     parity,
/// )
/// .unwrap();
/// assert_eq!(
///     machine.output_of(["1", "1", "1"].map(Symbol::leaf)).unwrap(),
///     Some(Symbol::leaf("odd"))
/// );
/// ```
#[derive(Clone)]
pub struct FnTransition<F>(pub F);

impl<F> TransitionFunction for FnTransition<F>
where
    F: Fn(&Symbol, &Symbol) -> Result<Successor, MachineError> + Send + Sync,
{
    fn apply(&self, state: &Symbol, input: &Symbol) -> Result<Successor, MachineError> {
        (self.0)(state, input)
    }
}

impl<F> Debug for FnTransition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnTransition")
    }
}
