use llrb_map::{Error, OrderedMap};
use proptest::prelude::*;
use std::collections::BTreeMap as StdMap;
use std::ops::Bound;

mod common;
use common::*;

fn check_ops(ops: Vec<Op>) {
    let mut map: OrderedMap<u16, u16> = OrderedMap::new("crosscheck");
    let mut std_map = StdMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => assert_eq!(map.insert(k, v), std_map.insert(k, v)),
            Op::Create(k, v) => {
                if std_map.contains_key(&k) {
                    assert_eq!(map.create(k, v), Err(Error::OverwriteKey));
                } else {
                    std_map.insert(k, v);
                    assert_eq!(map.create(k, v), Ok(()));
                }
            }
            Op::Remove(k) if std_map.is_empty() => {
                assert_eq!(map.remove(&k), Err(Error::EmptyMap));
            }
            Op::Remove(k) => assert_eq!(map.remove(&k), Ok(std_map.remove(&k))),
            Op::DeleteMin => {
                let first = std_map.keys().next().cloned();
                let expected = first.map(|k| (k, std_map.remove(&k).unwrap()));
                assert_eq!(map.delete_min().ok(), expected);
            }
            Op::DeleteMax => {
                let last = std_map.keys().next_back().cloned();
                let expected = last.map(|k| (k, std_map.remove(&k).unwrap()));
                assert_eq!(map.delete_max().ok(), expected);
            }
        }
        assert_eq!(map.len(), std_map.len());
        if let Err(err) = map.validate() {
            panic!("invalid tree: {}", err);
        }
    }

    assert_eq_iters(map.iter(), std_map.iter().map(|(k, v)| (*k, *v)));
    assert_eq!(map.min(), std_map.keys().next().cloned());
    assert_eq!(map.max(), std_map.keys().next_back().cloned());
}

fn check_height(v: Vec<(u16, u16)>) {
    let map = OrderedMap::load_from("crosscheck", v);
    let n = map.len();
    if n == 0 {
        assert_eq!(map.height(), -1);
    } else {
        let bound = 2.0 * ((n + 1) as f64).log2();
        assert!((map.height() as f64) <= bound);
    }
}

fn check_range(v: Vec<(u16, u16)>, r: (Bound<u16>, Bound<u16>)) {
    let map = OrderedMap::load_from("crosscheck", v.clone());
    let std_map: StdMap<u16, u16> = v.into_iter().collect();

    let reversed = match r {
        (Bound::Included(a), Bound::Included(b)) => a > b,
        (Bound::Included(a), Bound::Excluded(b))
        | (Bound::Excluded(a), Bound::Included(b)) => a >= b,
        (Bound::Excluded(a), Bound::Excluded(b)) => a >= b,
        _ => false,
    };
    if reversed {
        // std panics for these, ours yields nothing.
        assert!(map.range(r).next().is_none());
        assert!(map.range(r).rev().next().is_none());
        return;
    }

    let expected = std_map.range(r).map(|(k, v)| (*k, *v));
    assert_eq_iters(map.range(r), expected);
    let expected = std_map.range(r).rev().map(|(k, v)| (*k, *v));
    assert_eq_iters(map.range(r).rev(), expected);
}

fn check_keys_between(v: Vec<(u16, u16)>, a: u16, b: u16) {
    let map = OrderedMap::load_from("crosscheck", v.clone());
    let std_map: StdMap<u16, u16> = v.into_iter().collect();

    if a > b {
        assert!(map.keys_between(&a, &b).next().is_none());
    } else {
        assert_eq_iters(map.keys_between(&a, &b), std_map.range(a..=b).map(|(k, _)| *k));
    }
    if let (Some(min), Some(max)) = (map.min(), map.max()) {
        assert_eq_iters(map.keys_between(&min, &max), map.keys());
    }
}

proptest! {
    #[test]
    fn test_ops(ops in ops()) {
        check_ops(ops);
    }

    #[test]
    fn test_height(v in small_int_pairs()) {
        check_height(v);
    }

    #[test]
    fn test_range(v in small_int_pairs(), r in range_bounds_1k()) {
        check_range(v, r);
    }

    #[test]
    fn test_keys_between(v in small_int_pairs(), a in 0u16..1024, b in 0u16..1024) {
        check_keys_between(v, a, b);
    }
}
