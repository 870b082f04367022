//! Property tests pitting the tree against a plain vector model

mod common;

use proptest::prelude::*;
use rangefold::{AggregationTree, Fold, Min, Sum};

/// A tree length together with an arbitrary interleaving of point updates.
fn length_and_updates() -> impl Strategy<Value = (usize, Vec<(usize, i64)>)> {
    (1usize..48).prop_flat_map(|length| {
        (
            Just(length),
            proptest::collection::vec((0..length, -1000i64..1000), 0..64),
        )
    })
}

proptest! {
    #[test]
    fn sums_match_the_vector_model((length, updates) in length_and_updates()) {
        common::init_tracing();

        let mut tree = AggregationTree::new(length, Sum::<i64>::new()).expect("positive length");
        let mut model = vec![0i64; length];

        for (index, value) in updates {
            tree.set(index, value).expect("index in range");
            model[index] = value;
            prop_assert_eq!(*tree.get(index).expect("index in range"), value);
        }

        for i in 0..=length {
            for j in 0..=length {
                let expected: i64 = if i < j { model[i..j].iter().sum() } else { 0 };
                prop_assert_eq!(
                    tree.aggregate(i, j).expect("bounds in range"),
                    expected,
                    "range [{}, {})", i, j
                );
            }
        }
    }

    #[test]
    fn minimums_match_the_vector_model((length, updates) in length_and_updates()) {
        let mut tree =
            AggregationTree::new(length, Min::new(i64::MAX)).expect("positive length");
        let mut model = vec![i64::MAX; length];

        for (index, value) in updates {
            tree.set(index, value).expect("index in range");
            model[index] = value;
        }

        for i in 0..length {
            for j in i + 1..=length {
                let expected = *model[i..j].iter().min().expect("non-empty");
                prop_assert_eq!(tree.aggregate(i, j).expect("bounds in range"), expected);
            }
        }
    }

    #[test]
    fn concatenations_match_the_vector_model(
        words in proptest::collection::vec("[a-z]{1,3}", 1..40),
    ) {
        // Concatenation is associative but not commutative: this pins the
        // left-to-right evaluation order for every decomposition shape.
        let concat = Fold::new(String::new(), |left: String, right: String| left + &right);
        let mut tree = AggregationTree::new(words.len(), concat).expect("positive length");
        for (index, word) in words.iter().enumerate() {
            tree.set(index, word.clone()).expect("index in range");
        }

        for i in 0..=words.len() {
            for j in i..=words.len() {
                prop_assert_eq!(
                    tree.aggregate(i, j).expect("bounds in range"),
                    words[i..j].concat(),
                    "range [{}, {})", i, j
                );
            }
        }
    }
}
