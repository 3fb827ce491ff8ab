use std::cell::Cell;

use basis::sequence::{
    chain_all, from_fn, product_all, range, repeat, zip_all, IntoSequence, LocalBoxSequence,
    SequenceExt,
};
use basis::Error;
use basis_test::seeded_rng;

#[test]
fn derived_sequences_are_lazy() {
    let counter = Cell::new(0);
    let pulled = &counter;
    let source = from_fn(move || (0..5).inspect(move |_| pulled.set(pulled.get() + 1)));
    let evens = (&source).map(|x| x * 10).filter(|x| x % 20 == 0);
    assert_eq!(pulled.get(), 0);
    assert_eq!(evens.head(), Ok(0));
    assert_eq!(pulled.get(), 1);
    assert_eq!(evens.to_vec(), [0, 20, 40]);
    assert_eq!(evens.to_vec(), [0, 20, 40]);
}

#[test]
fn product_is_lexicographic() {
    let pairs = "01".into_sequence().product("ab");
    assert_eq!(pairs.to_vec(), [('0', 'a'), ('0', 'b'), ('1', 'a'), ('1', 'b')]);
    assert_eq!(pairs.count(), 4);
    assert!(range(0, 3).product(Vec::<u8>::new()).is_empty());

    let words: Vec<String> =
        product_all(["ab", "xy"]).iter().map(|w| w.into_iter().collect()).collect();
    assert_eq!(words, ["ax", "ay", "bx", "by"]);
}

#[test]
fn zip_stops_at_the_shortest() {
    let s = range(0, 10).zip("abc");
    assert_eq!(s.to_vec(), [(0, 'a'), (1, 'b'), (2, 'c')]);
    assert_eq!(repeat(1).zip(vec![2, 3]).count(), 2);
    assert_eq!(zip_all(vec![vec![1, 2, 3], vec![4, 5]]).to_vec(), [vec![1, 4], vec![2, 5]]);
}

#[test]
fn chains_and_flattening() {
    let s = range(0, 2).chain(vec![7, 8]);
    assert_eq!(s.to_vec(), [0, 1, 7, 8]);
    assert_eq!(chain_all(["ab", "", "c"]).join(""), "abc");
    let nested = vec![vec![1], vec![], vec![2, 3]].into_sequence().flatten();
    assert_eq!(nested.to_vec(), [1, 2, 3]);
    assert_eq!(nested.to_vec(), [1, 2, 3]);
}

#[test]
fn cycles() {
    let s = "ab".into_sequence();
    assert_eq!(s.clone().cycle_n(3).join(""), "ababab");
    assert!(s.clone().cycle_n(0).is_empty());
    assert_eq!(s.clone().cycle().iter().take(5).collect::<String>(), "ababa");
    assert!("".into_sequence().cycle().is_empty());
}

#[test]
fn folds_and_scans() {
    let s = range(1, 5);
    assert_eq!(s.foldl(0, |acc, x| acc * 10 + x), 1234);
    assert_eq!(s.foldr(0, |x, acc| acc * 10 + x), 4321);
    assert_eq!(s.foldl1(|a, b| a - b), Some(1 - 2 - 3 - 4));
    assert_eq!(s.foldr1(|a, b| a - b), Some(1 - (2 - (3 - 4))));
    assert_eq!(s.scanl(0, |acc, x| acc + x).to_vec(), [0, 1, 3, 6, 10]);
    assert_eq!(s.scanl1(|a, b| a * b).to_vec(), [1, 2, 6, 24]);
    assert_eq!(s.scanr(0, |x, acc| x + acc).to_vec(), [0, 4, 7, 9, 10]);
    assert_eq!(s.scanr1(|a, b| a.max(b)).to_vec(), [4, 4, 4, 4]);
    assert_eq!(range(0, 0).foldl1(|a: i32, b| a + b), None);
}

#[test]
fn for_each_and_friends() {
    let s = vec!["a", "bb", "ccc"].into_sequence();
    assert_eq!(s.for_each(|x, i| format!("{}{}", i, x)), Some("2ccc".to_string()));
    assert_eq!(s.for_each_if(|x, _| x.len(), |x, _| x.len() < 3), Some(2));
    assert_eq!(s.for_each_if(|x, _| x.len(), |_, _| false), None);
    assert_eq!(Vec::<u8>::new().into_sequence().for_each(|x, _| x), None);
}

#[test]
fn consumers() {
    let s = vec![3, 1, 4, 1, 5].into_sequence();
    assert_eq!(s.head(), Ok(3));
    assert_eq!(s.last(), Ok(5));
    assert_eq!(s.min(), Some(1));
    assert_eq!(s.max(), Some(5));
    assert_eq!(s.sum::<i32>(), 14);
    assert!(s.all(|x| x > 0));
    assert!(!s.any(|x| x > 5));
    assert_eq!(s.lesser(|x| *x), [1, 1]);
    assert_eq!(s.greater(|x| x % 3), [5]);
    assert_eq!(s.join(", "), "3, 1, 4, 1, 5");

    let nothing = Vec::<i32>::new().into_sequence();
    assert_eq!(nothing.head(), Err(Error::EmptySequence { op: "head" }));
    assert_eq!(
        nothing.last().map_err(|e| e.to_string()),
        Err("tried to get the last value of an empty sequence".to_string())
    );
    assert_eq!(nothing.head_or(9), 9);
    assert_eq!(nothing.last_or(9), 9);
    assert_eq!(nothing.min(), None);
    assert!(nothing.greater(|x| *x).is_empty());
}

#[test]
fn any_and_all_short_circuit() {
    let counter = Cell::new(0);
    let pulled = &counter;
    let s = from_fn(move || (0..).inspect(move |_| pulled.set(pulled.get() + 1)));
    assert!(s.any(|x| x == 3));
    assert_eq!(pulled.get(), 4);
    assert!(!s.all(|x| x < 2));
    assert_eq!(pulled.get(), 4 + 3);
}

#[test]
fn buffered_orderings() {
    let s = vec![3, 1, 2].into_sequence();
    assert_eq!(s.clone().reverse().to_vec(), [2, 1, 3]);
    assert_eq!(s.clone().sorted().to_vec(), [1, 2, 3]);
    assert_eq!(s.clone().sorted_by(|a, b| b.cmp(a)).to_vec(), [3, 2, 1]);
    let words = vec!["ccc", "a", "bb", "d"].into_sequence();
    assert_eq!(words.sorted_by_key(|w| w.len()).to_vec(), ["a", "d", "bb", "ccc"]);
}

#[test]
fn enumerate_and_filter_map() {
    let s = "a1b2".into_sequence();
    assert_eq!(s.clone().filter_map(|c| c.to_digit(10)).to_vec(), [1, 2]);
    assert_eq!(s.enumerate().filter(|(i, _)| i % 2 == 1).map(|(_, c)| c).join(""), "12");
}

#[test]
fn sampling_keeps_order_and_size() {
    let mut rng = seeded_rng(42);
    let s = range(0, 100);
    let picked = s.sample(10, &mut rng);
    assert_eq!(picked.len(), 10);
    assert!(picked.as_slice().windows(2).all(|w| w[0] < w[1]));

    let everything = s.sample(200, &mut rng);
    assert_eq!(everything.as_slice(), s.to_vec().as_slice());
    assert!(s.sample(0, &mut rng).is_empty());
}

#[test]
fn boxed_sequences_erase_the_type() {
    let mut seqs: Vec<LocalBoxSequence<'static, i32>> = Vec::new();
    seqs.push(range(0, 3).boxed());
    seqs.push(vec![9].into_sequence().map(|x| x + 1).boxed());
    let joined = chain_all(seqs);
    assert_eq!(joined.to_vec(), [0, 1, 2, 10]);
    let clone = joined.clone();
    assert_eq!(clone.count(), 4);
}
