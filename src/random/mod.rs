use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    math::{ordered_set, OrderedSet},
    prelude::*,
};

/// The input signals of randomly generated machines.
pub const RANDOM_INPUTS: [&str; 2] = ["a", "b"];
/// The output signals of randomly generated machines.
pub const RANDOM_OUTPUTS: [&str; 2] = ["0", "1"];

/// Generates a random machine with `size` states, which are named `{prefix}0` up to
/// `{prefix}{size - 1}`, the first one being initial. The input alphabet is `{a, b}` and the
/// output alphabet is `{0, 1}`. For each state and input, a target state and an output are drawn
/// uniformly at random.
///
/// As every machine needs an initial state, a `size` of zero is treated as one. Note that
/// depending on the drawn transitions, some states may be unreachable.
pub fn generate_random_mealy(prefix: &str, size: usize) -> Machine {
    let mut rng = fastrand::Rng::new();
    generate_random_mealy_with(&mut rng, prefix, size)
}

/// Works as [`generate_random_mealy`], but draws from the given `rng`. Seeding the generator
/// makes the resulting machine reproducible.
pub fn generate_random_mealy_with(rng: &mut fastrand::Rng, prefix: &str, size: usize) -> Machine {
    let size = size.max(1);
    let states: Vec<_> = (0..size)
        .map(|i| Symbol::leaf(format!("{prefix}{i}")))
        .collect();
    let inputs = ordered_set(RANDOM_INPUTS.into_iter().map(Symbol::leaf));
    let outputs: Vec<_> = RANDOM_OUTPUTS.into_iter().map(Symbol::leaf).collect();

    let mut table = TransitionTable::new();
    for q in &states {
        for sym in &inputs {
            let target = states[rng.usize(..states.len())].clone();
            let output = outputs[rng.usize(..outputs.len())].clone();
            table.insert(q, sym, target, output);
        }
    }
    debug!(
        "drew {} transitions for random machine with {size} states",
        table.len()
    );

    let initial = states[0].clone();
    Machine::from_parts(
        inputs,
        ordered_set(outputs),
        ordered_set(states),
        initial,
        Arc::new(table),
    )
}

/// Generates a random word over the given `alphabet`, whose length is drawn uniformly from the
/// range `min_len..=max_len`. If `max_len` is smaller than `min_len`, the word has length
/// `min_len`. Returns the empty word if the alphabet is empty.
pub fn generate_random_word(
    rng: &mut fastrand::Rng,
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
) -> Vec<Symbol> {
    let symbols: Vec<_> = alphabet.iter().collect();
    if symbols.is_empty() {
        return vec![];
    }
    let length = rng.usize(min_len..=max_len.max(min_len));
    (0..length)
        .map(|_| symbols[rng.usize(..symbols.len())].clone())
        .collect()
}

/// Generate a set of up to `number` distinct random words over the given `alphabet`, see
/// [`generate_random_word`]. Words that are drawn repeatedly are only kept once.
pub fn generate_random_words(
    rng: &mut fastrand::Rng,
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> OrderedSet<Vec<Symbol>> {
    let words = ordered_set(
        (0..number).map(|_| generate_random_word(rng, alphabet, min_len, max_len)),
    );
    info!("drew {} distinct random words", words.len());
    words
}
