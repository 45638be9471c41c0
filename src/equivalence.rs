use tracing::debug;

use crate::prelude::*;

/// Searches the reachable part of a product machine for a transition whose output is not
/// stable, i.e. on which the two operands emit different outputs. Returns the state and input
/// of the first such transition, iterating states and inputs in order.
pub(crate) fn find_unstable(
    reduced: &Machine,
) -> Result<Option<(Symbol, Symbol)>, MachineError> {
    for state in reduced.states() {
        for input in reduced.input_alphabet() {
            let (_, output) = reduced.transition(state, input)?;
            if !output.is_stable() {
                debug!("found unstable output {output:?} in state {state} on input {input}");
                return Ok(Some((state.clone(), input.clone())));
            }
        }
    }
    Ok(None)
}

/// Decides whether `lhs` and `rhs` are output-equivalent, meaning for every input word they
/// emit the same sequence of outputs.
///
/// This is done by building the product of both machines, trimming it to its reachable part
/// and checking that every reachable transition emits a stable output. Machines whose alphabets
/// differ cannot be compared, in that case [`MachineError::MismatchedAlphabet`] is returned.
///
/// States of the product are told apart by their labels only. Two pairs with the same label,
/// like `(x, y_z)` and `(x_y, z)`, are treated as one state and only the first one that is
/// discovered is explored. If the operands use [`crate::symbol::PAIR_SEPARATOR`] in their state
/// labels, the result may therefore claim equivalence of machines that differ.
///
/// # Example
/// ```
/// use mealy::prelude::*;
///
/// let two_states = Machine::builder()
///     .with_initial("q0")
///     .with_transitions([("q0", "a", "0", "q1"), ("q1", "a", "0", "q0")])
///     .into_machine()
///     .unwrap();
/// let one_state = Machine::builder()
///     .with_initial("p0")
///     .with_transitions([("p0", "a", "0", "p0")])
///     .into_machine()
///     .unwrap();
/// assert!(are_equivalent(&two_states, &one_state).unwrap());
/// ```
pub fn are_equivalent(lhs: &Machine, rhs: &Machine) -> Result<bool, MachineError> {
    let product = lhs.product(rhs)?;
    let reduced = product.trim()?;
    debug!(
        "product has {} states of which {} are reachable",
        product.size(),
        reduced.size()
    );
    Ok(find_unstable(&reduced)?.is_none())
}

/// Computes a length-lexicographically minimal input word on which `lhs` and `rhs` emit
/// different outputs on the last transition. If the machines are equivalent, `None` is
/// returned. Like [`are_equivalent`], this fails if the alphabets differ and it is subject to the
/// same conflation of product states with equal labels.
pub fn separating_word(
    lhs: &Machine,
    rhs: &Machine,
) -> Result<Option<Vec<Symbol>>, MachineError> {
    let product = lhs.product(rhs)?;
    for rep in product.minimal_representatives() {
        let (access, state) = rep?;
        for input in product.input_alphabet() {
            let (_, output) = product.transition(&state, input)?;
            if !output.is_stable() {
                let mut word = access;
                word.push(input.clone());
                return Ok(Some(word));
            }
        }
    }
    Ok(None)
}

impl Machine {
    /// Returns true if `self` and `other` are output-equivalent, see [`are_equivalent`].
    pub fn equivalent(&self, other: &Machine) -> Result<bool, MachineError> {
        are_equivalent(self, other)
    }

    /// Attempts to construct a word that separates `self` and `other`, see [`separating_word`].
    pub fn separating_word(&self, other: &Machine) -> Result<Option<Vec<Symbol>>, MachineError> {
        separating_word(self, other)
    }
}

/// Two machines are considered equal if they are output-equivalent. If they cannot be compared
/// because their alphabets differ (or a transition fails), they are considered unequal.
impl PartialEq for Machine {
    fn eq(&self, other: &Self) -> bool {
        matches!(are_equivalent(self, other), Ok(true))
    }
}
