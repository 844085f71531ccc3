use proptest::prelude::*;
use std::ops::Bound;

pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(mut i: I, mut j: J)
where
    I::Item: std::fmt::Debug + Eq,
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

#[derive(Clone, Debug)]
pub(super) enum Op {
    Insert(u16, u16),
    Create(u16, u16),
    Remove(u16),
    DeleteMin,
    DeleteMax,
}

pub(super) fn small_int_pairs() -> impl Strategy<Value = Vec<(u16, u16)>> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

pub(super) fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0u16..256, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => (0u16..256, any::<u16>()).prop_map(|(k, v)| Op::Create(k, v)),
        3 => (0u16..256).prop_map(Op::Remove),
        1 => Just(Op::DeleteMin),
        1 => Just(Op::DeleteMax),
    ];
    prop::collection::vec(op, 0..1024)
}

pub(super) fn range_bounds_1k() -> impl Strategy<Value = (Bound<u16>, Bound<u16>)> {
    let bound = || {
        prop_oneof![
            Just(Bound::Unbounded),
            (0u16..1024).prop_map(Bound::Excluded),
            (0u16..1024).prop_map(Bound::Included),
        ]
    };
    (bound(), bound())
}
