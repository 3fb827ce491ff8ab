use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use basis::sequence::{
    empty, from_fn, iterate, iterate_n, once, range, range_step, repeat, repeat_n, IntoSequence,
    Items, Sequence, SequenceExt,
};

#[test]
fn vectors_restart() {
    let s = vec![1, 2, 3].into_sequence();
    assert_eq!(s.to_vec(), [1, 2, 3]);
    assert_eq!(s.to_vec(), [1, 2, 3]);
}

#[test]
fn cursors_are_independent() {
    let s = "abc".into_sequence();
    let mut a = s.cursor();
    let mut b = s.cursor();
    assert_eq!(a.next(), Some('a'));
    assert_eq!(a.next(), Some('b'));
    assert_eq!(b.next(), Some('a'));
    assert_eq!(a.next(), Some('c'));
    assert_eq!(a.next(), None);
    assert_eq!(a.next(), None);
    assert_eq!(b.next(), Some('b'));
}

#[test]
fn maps_iterate_in_key_order() {
    let mut hashed = HashMap::new();
    hashed.insert("b", 2);
    hashed.insert("c", 3);
    hashed.insert("a", 1);
    let s = hashed.into_sequence();
    assert_eq!(s.to_vec(), [("a", 1), ("b", 2), ("c", 3)]);

    let tree: BTreeMap<_, _> = [(2, 'x'), (1, 'y')].into_iter().collect();
    assert_eq!(tree.into_sequence().to_vec(), [(1, 'y'), (2, 'x')]);

    let back: BTreeMap<&str, i32> = s.collect();
    assert_eq!(back.len(), 3);
    assert_eq!(back["b"], 2);
}

#[test]
fn options_and_slices() {
    assert_eq!(Some(4).into_sequence().to_vec(), [4]);
    assert!(None::<u8>.into_sequence().is_empty());
    let slice: &[u8] = &[1, 2];
    assert_eq!(slice.into_sequence().count(), 2);
    let items: Items<u8> = vec![5, 6].into_sequence();
    assert_eq!(items.as_slice(), &[5, 6]);
}

#[test]
fn generator_functions() {
    let traversals = Cell::new(0);
    let s = from_fn(|| {
        traversals.set(traversals.get() + 1);
        0..3
    });
    assert_eq!(traversals.get(), 0);
    assert_eq!(s.to_vec(), [0, 1, 2]);
    assert_eq!(s.sum::<i32>(), 3);
    assert_eq!(traversals.get(), 2);
}

#[test]
fn singletons_and_empties() {
    assert_eq!(once("x").to_vec(), ["x"]);
    assert!(empty::<u8>().is_empty());
    assert_eq!(empty::<u8>().count(), 0);
}

#[test]
fn ranges() {
    assert_eq!(range(0, 5).to_vec(), [0, 1, 2, 3, 4]);
    assert!(range(5, 0).is_empty());
    assert!(range(3, 3).is_empty());
    assert_eq!(range_step(10, 0, -4).to_vec(), [10, 6, 2]);
    assert_eq!(range_step(0.0, -1.0, -0.5).to_vec(), [0.0, -0.5]);
    assert!(range_step(0, 10, 0).is_empty());
    assert!(range_step(0, 10, -1).is_empty());
    assert!(range_step(0.0, f64::NAN, 1.0).is_empty());
}

#[test]
fn repeats() {
    assert_eq!(repeat('z').iter().take(3).collect::<String>(), "zzz");
    assert_eq!(repeat_n(1, 4).to_vec(), [1, 1, 1, 1]);
    assert!(repeat_n(1, 0).is_empty());
}

#[test]
fn iterations() {
    let powers = iterate(|x: &u64| x * 2, 1);
    assert_eq!(powers.iter().take(5).collect::<Vec<_>>(), [1, 2, 4, 8, 16]);
    assert_eq!(powers.head(), Ok(1));
    let shouts = iterate_n(|s: &String| format!("{}!", s), "hey".to_string(), 3);
    assert_eq!(shouts.to_vec(), ["hey", "hey!", "hey!!"]);
    assert!(iterate_n(|x: &u8| *x, 0, 0).is_empty());
}
