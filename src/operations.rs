mod product;
pub use product::{product, ProductTransition};

mod trim;
pub use trim::trim;

#[cfg(test)]
mod tests {
    use crate::{error::AlphabetKind, prelude::*, tests::single_state};

    fn three_states() -> Machine {
        Machine::builder()
            .with_initial("q0")
            .with_transitions([
                ("q0", "a", "0", "q1"),
                ("q0", "b", "1", "q0"),
                ("q1", "a", "1", "q0"),
                ("q1", "b", "0", "q1"),
                ("q2", "a", "0", "q0"),
                ("q2", "b", "0", "q1"),
            ])
            .into_machine()
            .unwrap()
    }

    #[test]
    fn product() {
        let left = three_states();
        let right = single_state("p", "0");
        let prod = left.product(&right).unwrap();

        assert_eq!(prod.size(), 3);
        assert_eq!(prod.initial(), &Symbol::pair("q0".into(), "p0".into()));
        assert_eq!(prod.input_alphabet(), left.input_alphabet());
        assert_eq!(prod.output_alphabet(), left.output_alphabet());
        assert!(prod.states().iter().all(Symbol::is_pair));

        let (target, output) = prod.transition(prod.initial(), &"a".into()).unwrap();
        assert_eq!(target, Symbol::pair("q1".into(), "p0".into()));
        assert_eq!(output, Symbol::pair("0".into(), "0".into()));
        assert_eq!(output.label(), "0_0");

        // the operands are untouched
        assert_eq!(left.size(), 3);
        assert_eq!(right.size(), 1);
    }

    #[test]
    fn product_outlives_operands() {
        let prod = {
            let left = three_states();
            let right = three_states();
            left.product(&right).unwrap()
        };
        assert_eq!(prod.size(), 9);
        assert_eq!(
            prod.run(["a", "b", "a"].map(Symbol::leaf)).unwrap(),
            ["0_0", "0_0", "1_1"]
                .map(|label| {
                    let (l, r) = label.split_once('_').unwrap();
                    Symbol::pair(l.into(), r.into())
                })
                .to_vec()
        );
    }

    #[test]
    fn product_states_with_equal_labels_share_a_slot() {
        let left = Machine::builder()
            .with_initial("x")
            .with_transitions([("x", "a", "0", "x_y"), ("x_y", "a", "0", "x")])
            .into_machine()
            .unwrap();
        let right = Machine::builder()
            .with_initial("z")
            .with_transitions([("z", "a", "0", "y_z"), ("y_z", "a", "0", "z")])
            .into_machine()
            .unwrap();

        let prod = left.product(&right).unwrap();
        assert_eq!(prod.size(), 3);
        assert_eq!(prod.states().iter().count(), prod.size());
        assert_eq!(
            prod.states().iter().map(Symbol::label).collect::<Vec<_>>(),
            vec!["x_y_y_z", "x_y_z", "x_z"]
        );

        let collided = prod
            .states()
            .iter()
            .find(|q| q.label() == "x_y_z")
            .unwrap();
        assert_eq!(
            collided.sources(),
            Some((&Symbol::leaf("x"), &Symbol::leaf("y_z")))
        );
        assert!(prod
            .states()
            .contains(&Symbol::pair("x_y".into(), "z".into())));
    }

    #[test]
    fn product_requires_equal_alphabets() {
        let left = three_states();
        let other_inputs = Machine::builder()
            .with_initial("p0")
            .with_transitions([("p0", "a", "0", "p0"), ("p0", "c", "0", "p0")])
            .into_machine()
            .unwrap();
        assert!(matches!(
            left.product(&other_inputs),
            Err(MachineError::MismatchedAlphabet {
                kind: AlphabetKind::Input
            })
        ));

        let other_outputs = Machine::builder()
            .with_initial("p0")
            .with_outputs(["0", "1", "2"])
            .with_transitions([("p0", "a", "2", "p0"), ("p0", "b", "0", "p0")])
            .into_machine()
            .unwrap();
        assert!(matches!(
            crate::operations::product(&left, &other_outputs),
            Err(MachineError::MismatchedAlphabet {
                kind: AlphabetKind::Output
            })
        ));
    }

    #[test]
    fn product_transition_needs_pairs() {
        let prod = three_states().product(&three_states()).unwrap();
        assert!(matches!(
            prod.transition(&"q0".into(), &"a".into()),
            Err(MachineError::MalformedCompositeState(q)) if q == "q0"
        ));
    }

    #[test_log::test]
    fn trim() {
        let mm = three_states();
        assert_eq!(mm.size(), 3);

        let trimmed = mm.trim().unwrap();
        assert_eq!(trimmed.size(), 2);
        assert!(!trimmed.states().contains(&Symbol::leaf("q2")));
        assert_eq!(trimmed.initial(), mm.initial());
        assert_eq!(trimmed.input_alphabet(), mm.input_alphabet());
        assert_eq!(mm.size(), 3);

        assert_eq!(trimmed.trim().unwrap().states(), trimmed.states());

        let mut in_place = mm.clone();
        in_place.trim_in_place().unwrap();
        assert_eq!(in_place.states(), trimmed.states());
    }

    #[test]
    fn trim_product() {
        let prod = three_states().product(&three_states()).unwrap();
        let trimmed = crate::operations::trim(&prod).unwrap();
        assert_eq!(
            trimmed
                .states()
                .iter()
                .map(Symbol::label)
                .collect::<Vec<_>>(),
            vec!["q0_q0", "q1_q1"]
        );
        assert!(trimmed
            .states()
            .iter()
            .all(|q| q.sources().is_some_and(|(l, r)| l == r)));
    }

    #[cfg(feature = "random")]
    #[test]
    fn trim_is_idempotent() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for size in 1..20 {
            let mm = crate::random::generate_random_mealy_with(&mut rng, "q", size);
            let once = mm.trim().unwrap();
            let twice = once.trim().unwrap();
            assert_eq!(once.states(), twice.states());
            assert!(once.states().is_subset(mm.states()));
            assert!(once.states().contains(mm.initial()));
        }
    }
}
