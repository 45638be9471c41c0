use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::prelude::*;

/// A symbol is encoded as its label. Decoding always produces a leaf, so composite symbols do
/// not survive a round trip: the decoded symbol has the same label but is structurally
/// different.
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Symbol::leaf)
    }
}

/// Target and output of a single transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    state: Symbol,
    signal: Symbol,
}

/// The JSON document a machine is encoded into. Transitions are keyed by the label of the
/// source state and then by the label of the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MachineDocument {
    initial_state: Symbol,
    states: Vec<Symbol>,
    input_signals: Vec<Symbol>,
    output_signals: Vec<Symbol>,
    transition_function: BTreeMap<String, BTreeMap<String, Entry>>,
}

impl MachineDocument {
    fn from_machine(machine: &Machine) -> Result<Self, MachineError> {
        let mut transition_function = BTreeMap::new();
        for q in machine.states() {
            let mut row = BTreeMap::new();
            for sym in machine.input_alphabet() {
                let (state, signal) = machine.transition(q, sym)?;
                row.insert(sym.label().to_string(), Entry { state, signal });
            }
            transition_function.insert(q.label().to_string(), row);
        }
        Ok(Self {
            initial_state: machine.initial().clone(),
            states: machine.states().iter().cloned().collect(),
            input_signals: machine.input_alphabet().iter().cloned().collect(),
            output_signals: machine.output_alphabet().iter().cloned().collect(),
            transition_function,
        })
    }

    fn into_machine(self) -> Result<Machine, MachineError> {
        let transitions = self
            .transition_function
            .into_iter()
            .flat_map(|(q, row)| {
                row.into_iter()
                    .map(move |(sym, entry)| (Symbol::leaf(q.as_str()), Symbol::leaf(sym), entry))
            })
            .map(|(q, sym, Entry { state, signal })| (q, sym, signal, state));
        Machine::builder()
            .with_states(self.states)
            .with_inputs(self.input_signals)
            .with_outputs(self.output_signals)
            .with_initial(self.initial_state)
            .with_transitions(transitions)
            .into_machine()
    }
}

impl Machine {
    /// Encodes the machine as a compact JSON document of the form
    /// ```json
    /// { "initial_state": "q0", "states": ["q0", "q1"], "input_signals": ["a"],
    ///   "output_signals": ["0", "1"],
    ///   "transition_function": { "q0": { "a": { "state": "q1", "signal": "0" } }, ... } }
    /// ```
    /// Symbols are written as their labels. Fails if the transition function fails for some
    /// state and input.
    pub fn to_json(&self) -> Result<String, MachineError> {
        Ok(serde_json::to_string(&MachineDocument::from_machine(self)?)?)
    }

    /// Works like [`Machine::to_json`], but produces indented output.
    pub fn to_json_pretty(&self) -> Result<String, MachineError> {
        Ok(serde_json::to_string_pretty(
            &MachineDocument::from_machine(self)?,
        )?)
    }

    /// Decodes a machine from a JSON document as produced by [`Machine::to_json`]. All symbols
    /// are decoded as leaves. The document is validated like the input of a
    /// [`MachineBuilder`], so it has to describe a total and deterministic table over the
    /// declared states and signals.
    ///
    /// # Example
    /// ```
    /// use mealy::prelude::*;
    ///
    /// let mm = Machine::from_json(
    ///     r#"{
    ///         "initial_state": "q0",
    ///         "states": ["q0"],
    ///         "input_signals": ["a"],
    ///         "output_signals": ["0"],
    ///         "transition_function": { "q0": { "a": { "state": "q0", "signal": "0" } } }
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(mm.size(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Machine, MachineError> {
        let document: MachineDocument = serde_json::from_str(json)?;
        debug!(
            "decoded document with {} states and {} input signals",
            document.states.len(),
            document.input_signals.len()
        );
        document.into_machine()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::SymbolRole,
        prelude::*,
        tests::{single_state, toggle},
    };

    #[test]
    fn symbols_are_encoded_as_labels() {
        let pair = Symbol::pair("q0".into(), "p0".into());
        let encoded = serde_json::to_string(&pair).unwrap();
        assert_eq!(encoded, "\"q0_p0\"");

        let decoded: Symbol = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.is_leaf());
        assert_eq!(decoded.label(), pair.label());
        assert_ne!(decoded, pair);
    }

    #[test]
    fn document_shape() {
        let json = single_state("q", "1").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["initial_state"], "q0");
        assert_eq!(value["states"], serde_json::json!(["q0"]));
        assert_eq!(value["input_signals"], serde_json::json!(["a", "b"]));
        assert_eq!(value["output_signals"], serde_json::json!(["0", "1"]));
        assert_eq!(
            value["transition_function"]["q0"]["b"],
            serde_json::json!({ "state": "q0", "signal": "1" })
        );
    }

    #[test_log::test]
    fn round_trip() {
        let mm = toggle();
        let decoded = Machine::from_json(&mm.to_json_pretty().unwrap()).unwrap();
        assert_eq!(decoded.states(), mm.states());
        assert_eq!(decoded.initial(), mm.initial());
        assert!(are_equivalent(&mm, &decoded).unwrap());
        assert_eq!(decoded.to_json().unwrap(), mm.to_json().unwrap());
    }

    #[test]
    fn product_states_come_back_as_leaves() {
        let prod = toggle().product(&toggle()).unwrap().trim().unwrap();
        let json = prod.to_json().unwrap();
        // the outputs of a product are pairs, which are not part of its output alphabet
        assert!(matches!(
            Machine::from_json(&json),
            Err(MachineError::UnknownSymbol { role: SymbolRole::Output, .. })
        ));

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["output_signals"] = serde_json::json!([]);
        let decoded = Machine::from_json(&value.to_string()).unwrap();
        assert_eq!(
            decoded.states().iter().map(Symbol::label).collect::<Vec<_>>(),
            prod.states().iter().map(Symbol::label).collect::<Vec<_>>()
        );
        assert!(decoded.states().iter().all(Symbol::is_leaf));
        assert_ne!(decoded.initial(), prod.initial());
    }

    #[test]
    fn invalid_documents() {
        assert!(matches!(
            Machine::from_json("{ \"states\": [] }"),
            Err(MachineError::Json(_))
        ));
        let partial = r#"{
            "initial_state": "q0",
            "states": ["q0"],
            "input_signals": ["a", "b"],
            "output_signals": ["0"],
            "transition_function": { "q0": { "a": { "state": "q0", "signal": "0" } } }
        }"#;
        assert!(matches!(
            Machine::from_json(partial),
            Err(MachineError::MissingTransition { input, .. }) if input == "b"
        ));
    }
}
