//! Property tests for the sequence algebra.

use basis::sequence::{range, IntoSequence, SequenceExt};
use basis_test::seeded_rng;
use proptest::prelude::*;

proptest! {
    #[test]
    fn derived_sequences_restart(xs in prop::collection::vec(any::<i16>(), 0..32)) {
        let s = xs.clone().into_sequence().map(|x| i32::from(x) * 3).filter(|x| x % 2 == 0);
        let expected: Vec<i32> =
            xs.iter().map(|x| i32::from(*x) * 3).filter(|x| x % 2 == 0).collect();
        prop_assert_eq!(s.to_vec(), expected.clone());
        prop_assert_eq!(s.to_vec(), expected);
    }

    #[test]
    fn product_matches_nested_loops(
        a in prop::collection::vec(any::<u8>(), 0..6),
        b in prop::collection::vec(any::<u8>(), 0..6),
    ) {
        let mut expected = Vec::new();
        for x in &a {
            for y in &b {
                expected.push((*x, *y));
            }
        }
        prop_assert_eq!(a.into_sequence().product(b).to_vec(), expected);
    }

    #[test]
    fn zip_is_as_long_as_the_shortest(a in 0i32..40, b in 0i32..40) {
        let zipped = range(0, a).zip(range(0, b));
        prop_assert_eq!(zipped.count(), a.min(b) as usize);
    }

    #[test]
    fn last_scan_equals_the_fold(xs in prop::collection::vec(-50i64..50, 0..20)) {
        let s = xs.into_sequence();
        let scanned = s.clone().scanl(0, |acc, x| acc + x).last();
        prop_assert_eq!(scanned, Ok(s.foldl(0, |acc, x| acc + x)));
    }

    #[test]
    fn samples_are_ordered_subsets(len in 0i32..60, n in 0usize..80, seed in any::<u64>()) {
        let mut rng = seeded_rng(seed);
        let picked = range(0, len).sample(n, &mut rng);
        prop_assert_eq!(picked.len(), n.min(len as usize));
        prop_assert!(picked.as_slice().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(picked.as_slice().iter().all(|x| (0..len).contains(x)));
    }
}
