use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::{error::AlphabetKind, math::ordered_set, prelude::*};

/// The transition function of a product machine. It owns (cheap) clones of both operands, so a
/// product remains usable after the operands have been dropped.
#[derive(Debug, Clone)]
pub struct ProductTransition {
    left: Machine,
    right: Machine,
}

impl ProductTransition {
    /// Creates the product transition of `left` and `right`.
    pub fn new(left: Machine, right: Machine) -> Self {
        Self { left, right }
    }
}

impl TransitionFunction for ProductTransition {
    fn apply(&self, state: &Symbol, input: &Symbol) -> Result<Successor, MachineError> {
        let (l, r) = state
            .sources()
            .ok_or_else(|| MachineError::MalformedCompositeState(state.label().to_string()))?;
        let (l_target, l_output) = self.left.transition(l, input)?;
        let (r_target, r_output) = self.right.transition(r, input)?;
        Ok((
            Symbol::pair(l_target, r_target),
            Symbol::pair(l_output, r_output),
        ))
    }
}

impl Machine {
    /// Computes the synchronous product of `self` and `other`. Both machines need to have the
    /// same input and output alphabet, otherwise [`MachineError::MismatchedAlphabet`] is
    /// returned.
    ///
    /// The states of the product are all pairs of states, the initial state is the pair of
    /// initial states. On input `a`, the product moves from `(p, q)` to `(p', q')` emitting
    /// `(x, y)` where `p` moves to `p'` emitting `x` and `q` moves to `q'` emitting `y`.
    /// Note that the product is not trimmed, use [`Machine::trim`] to remove unreachable states.
    /// Pairs whose labels coincide, like `(x, y_z)` and `(x_y, z)`, occupy a single slot in the
    /// set of states, the pair that comes first in the order of the operands is kept.
    ///
    /// # Example
    /// ```
    /// use mealy::prelude::*;
    ///
    /// let mm = Machine::builder()
    ///     .with_initial("q0")
    ///     .with_transitions([("q0", "a", "0", "q1"), ("q1", "a", "1", "q0")])
    ///     .into_machine()
    ///     .unwrap();
    /// let product = mm.product(&mm).unwrap();
    /// assert_eq!(product.size(), 4);
    /// assert_eq!(product.initial().label(), "q0_q0");
    /// ```
    pub fn product(&self, other: &Machine) -> Result<Machine, MachineError> {
        if self.input_alphabet() != other.input_alphabet() {
            return Err(MachineError::MismatchedAlphabet {
                kind: AlphabetKind::Input,
            });
        }
        if self.output_alphabet() != other.output_alphabet() {
            return Err(MachineError::MismatchedAlphabet {
                kind: AlphabetKind::Output,
            });
        }

        let states = ordered_set(
            self.states()
                .iter()
                .cartesian_product(other.states())
                .map(|(l, r)| Symbol::pair(l.clone(), r.clone())),
        );
        let initial = Symbol::pair(self.initial().clone(), other.initial().clone());
        debug!(
            "building product of machines with {} and {} states",
            self.size(),
            other.size()
        );

        Ok(Machine::from_parts(
            self.input_alphabet().clone(),
            self.output_alphabet().clone(),
            states,
            initial,
            Arc::new(ProductTransition::new(self.clone(), other.clone())),
        ))
    }
}

/// Computes the synchronous product of `lhs` and `rhs`, see [`Machine::product`].
pub fn product(lhs: &Machine, rhs: &Machine) -> Result<Machine, MachineError> {
    lhs.product(rhs)
}
