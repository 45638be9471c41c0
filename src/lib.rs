//! Library for combining and comparing deterministic Mealy machines.
//!
//! A Mealy machine is a finite transition system in which every transition emits an output.
//! Here, a [`Machine`] consists of an input alphabet, an output alphabet, a finite set of states
//! with a designated initial state and a transition function that maps a state and an input to
//! the reached state and the emitted output. States and signals are both represented by
//! [`Symbol`]s, which are either plain labels or pairs of symbols that remember where they came
//! from.
//!
//! The crate implements a small algebra on machines:
//! - [`Machine::product`] runs two machines over the same alphabets in lockstep. Its states are
//!   pairs of states and it emits pairs of outputs.
//! - [`Machine::trim`] restricts a machine to the states that are reachable from its initial
//!   state, exploring the machine breadth-first.
//! - [`are_equivalent`] decides whether two machines emit the same outputs on every input word,
//!   by checking that the trimmed product only ever emits *stable* pairs, i.e. pairs whose two
//!   components coincide. [`separating_word`] additionally produces a shortest word on which
//!   two inequivalent machines differ.
//!
//! Machines can be assembled with a [`machine::MachineBuilder`], drawn at random (see the
//! `random` module, available with the `random` feature), encoded as JSON and rendered as a
//! transition table, in the DOT format or as a Mermaid diagram.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use mealy::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        equivalence::{are_equivalent, separating_word},
        error::MachineError,
        machine::{
            Alphabet, FnTransition, Machine, MachineBuilder, Successor, TransitionFunction,
            TransitionTable,
        },
        math,
        operations::{product, trim, ProductTransition},
        symbol::Symbol,
    };
}

/// This module contains type aliases for the collections that are used throughout the crate.
pub mod math;

/// Defines the [`Symbol`] type that is used for states and signals.
pub mod symbol;
pub use symbol::Symbol;

/// Contains the error type of the crate.
pub mod error;
pub use error::MachineError;

/// Defines [`Machine`], its transition functions and the means to construct and run it.
pub mod machine;
pub use machine::Machine;

/// Breadth-first exploration of the states that are reachable from the initial state.
pub mod reachable;

/// Product and trimming of machines.
pub mod operations;

/// Deciding the equivalence of machines.
pub mod equivalence;
pub use equivalence::{are_equivalent, separating_word};

/// Rendering machines in the DOT format and as Mermaid diagrams.
pub mod dot;

/// Encoding machines as JSON.
pub mod json;

/// Implements the generation of random machines.
#[cfg(feature = "random")]
pub mod random;
