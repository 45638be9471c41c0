use std::fmt::Display;

use thiserror::Error;

/// Distinguishes the two alphabets of a [`crate::Machine`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AlphabetKind {
    /// The input signals.
    Input,
    /// The output signals.
    Output,
}

impl Display for AlphabetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlphabetKind::Input => write!(f, "input"),
            AlphabetKind::Output => write!(f, "output"),
        }
    }
}

/// The role a [`crate::Symbol`] plays in a machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SymbolRole {
    /// The symbol is a state.
    State,
    /// The symbol is an input signal.
    Input,
    /// The symbol is an output signal.
    Output,
}

impl Display for SymbolRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolRole::State => write!(f, "state"),
            SymbolRole::Input => write!(f, "input signal"),
            SymbolRole::Output => write!(f, "output signal"),
        }
    }
}

/// Errors that can occur when constructing, combining, running or encoding machines.
#[derive(Error, Debug)]
pub enum MachineError {
    /// The operands of a product do not share their input or output alphabet.
    #[error("{kind} alphabets of the operands are unequal")]
    MismatchedAlphabet {
        /// Which of the alphabets differ.
        kind: AlphabetKind,
    },
    /// The transition function of a product was invoked on a state that is not a pair.
    #[error("state \"{0}\" is not composed of exactly two source states")]
    MalformedCompositeState(String),
    /// There is no transition for the given state and input.
    #[error("no transition defined for state \"{state}\" on input \"{input}\"")]
    MissingTransition {
        /// Label of the state.
        state: String,
        /// Label of the input signal.
        input: String,
    },
    /// Two different transitions were given for the same state and input.
    #[error("conflicting transitions for state \"{state}\" on input \"{input}\"")]
    Nondeterministic {
        /// Label of the state.
        state: String,
        /// Label of the input signal.
        input: String,
    },
    /// A transition mentions a symbol that was not declared.
    #[error("{role} \"{label}\" is not declared")]
    UnknownSymbol {
        /// Label of the offending symbol.
        label: String,
        /// In which role the symbol was used.
        role: SymbolRole,
    },
    /// The initial state is not among the states of the machine.
    #[error("initial state \"{0}\" is not among the declared states")]
    UnknownInitialState(String),
    /// No initial state was given.
    #[error("no initial state was given")]
    MissingInitialState,
    /// Encoding to or decoding from JSON failed.
    #[error("could not encode or decode machine: {0}")]
    Json(#[from] serde_json::Error),
}
