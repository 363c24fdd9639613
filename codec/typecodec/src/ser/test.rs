//! Tests for the serializer.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use super::*;
use crate::observe::Recorder;

/// Helper function to create a serializer and run a test with it
fn with_serializer<F>(mut f: F) -> Vec<u8>
where
    F: FnMut(&mut Serializer<Vec<u8>>) -> Result<()>,
{
    let mut serializer = Serializer::new(Vec::new());
    f(&mut serializer).unwrap();
    serializer.into_inner()
}

fn concat<const N: usize>(parts: [&[u8]; N]) -> Vec<u8> {
    parts.concat()
}

#[test]
fn primitives() {
    let buf = with_serializer(|s| 517i32.serialize(s));
    assert_eq!(buf, 517i32.to_ne_bytes());

    let buf = with_serializer(|s| 42u8.serialize(s));
    assert_eq!(buf, [42]);

    let buf = with_serializer(|s| 1.5f64.serialize(s));
    assert_eq!(buf, 1.5f64.to_ne_bytes());

    let buf = with_serializer(|s| b"Hello!\0".serialize(s));
    assert_eq!(buf, b"Hello!\0");
}

#[test]
fn strings() {
    let buf = with_serializer(|s| "hello".serialize(s));
    assert_eq!(buf, concat([&5u32.to_ne_bytes(), b"hello"]));

    let buf = with_serializer(|s| "hello".to_string().serialize(s));
    assert_eq!(buf, concat([&5u32.to_ne_bytes(), b"hello"]));

    // multi-byte characters count bytes, not characters
    let buf = with_serializer(|s| "héllo".serialize(s));
    assert_eq!(&buf[..4], &6u32.to_ne_bytes());
    assert_eq!(buf.len(), 10);

    // the empty string is only its count
    let buf = with_serializer(|s| String::new().serialize(s));
    assert_eq!(buf, 0u32.to_ne_bytes());
}

#[test]
fn sequences() {
    let buf = with_serializer(|s| vec![1i32, 2, 3, 5, 4].serialize(s));
    let expected: Vec<u8> = [5u32.to_ne_bytes()]
        .into_iter()
        .chain([1i32, 2, 3, 5, 4].map(i32::to_ne_bytes))
        .flatten()
        .collect();
    assert_eq!(buf, expected);

    let deque = VecDeque::from([7u16, 8]);
    let buf = with_serializer(|s| deque.serialize(s));
    assert_eq!(
        buf,
        concat([&2u32.to_ne_bytes(), &7u16.to_ne_bytes(), &8u16.to_ne_bytes()])
    );

    let buf = with_serializer(|s| Vec::<u64>::new().serialize(s));
    assert_eq!(buf, 0u32.to_ne_bytes());
}

#[test]
fn empty_containers_are_only_their_count() {
    let zero = 0u32.to_ne_bytes();

    assert_eq!(with_serializer(|s| HashSet::<u8>::new().serialize(s)), zero);
    assert_eq!(
        with_serializer(|s| BTreeSet::<String>::new().serialize(s)),
        zero
    );
    assert_eq!(
        with_serializer(|s| HashMap::<String, u64>::new().serialize(s)),
        zero
    );
    assert_eq!(
        with_serializer(|s| BTreeMap::<i32, Vec<i32>>::new().serialize(s)),
        zero
    );
}

#[test]
fn nested_sequences() {
    let value = vec![vec![1u8, 2], vec![], vec![3]];
    let buf = with_serializer(|s| value.serialize(s));

    assert_eq!(
        buf,
        concat([
            &3u32.to_ne_bytes(),
            &2u32.to_ne_bytes(),
            &[1, 2],
            &0u32.to_ne_bytes(),
            &1u32.to_ne_bytes(),
            &[3],
        ])
    );
}

#[test]
fn sets_follow_iteration_order() {
    let set = BTreeSet::from([30i32, 10, 20]);
    let buf = with_serializer(|s| set.serialize(s));

    assert_eq!(
        buf,
        concat([
            &3u32.to_ne_bytes(),
            &10i32.to_ne_bytes(),
            &20i32.to_ne_bytes(),
            &30i32.to_ne_bytes(),
        ])
    );
}

#[test]
fn maps_interleave_keys_and_values() {
    let map = BTreeMap::from([(2u8, "b".to_string()), (1u8, "a".to_string())]);
    let buf = with_serializer(|s| map.serialize(s));

    assert_eq!(
        buf,
        concat([
            &2u32.to_ne_bytes(),
            &[1],
            &1u32.to_ne_bytes(),
            b"a",
            &[2],
            &1u32.to_ne_bytes(),
            b"b",
        ])
    );
}

#[test]
fn emit_count() {
    let mut serializer = Serializer::new(Vec::new());

    assert_eq!(serializer.emit_count(3).unwrap(), 3);
    assert_eq!(serializer.writer(), &3u32.to_ne_bytes());
}

#[test]
#[cfg(target_pointer_width = "64")]
fn emit_count_overflow() {
    let mut serializer = Serializer::new(Vec::new());
    let len = u32::MAX as usize + 1;

    let error = serializer.emit_count(len).unwrap_err();

    assert!(matches!(error, Error::LengthOverflow { len: l } if l == len));
    assert!(serializer.writer().is_empty());
}

#[test]
fn emit_bytes() {
    let buf = with_serializer(|s| {
        s.emit_bytes(b"")?;
        s.emit_bytes(b"abc")
    });

    assert_eq!(buf, b"abc");
}

#[test]
fn observer_sees_every_dispatch() {
    let value = vec![vec!["x".to_string()], vec![]];
    let mut serializer = Serializer::with_observer(Vec::new(), Recorder::new());

    value.serialize(&mut serializer).unwrap();

    let (_, recorder) = serializer.into_parts();
    let events = recorder.into_events();

    let summary = events
        .iter()
        .map(|event| (event.shape, event.len, event.depth))
        .collect::<Vec<_>>();

    assert_eq!(summary, [
        (Shape::Sequence, Some(2), 0),
        (Shape::Sequence, Some(1), 1),
        (Shape::Text, Some(1), 2),
        (Shape::Sequence, Some(0), 1),
    ]);

    assert!(events
        .iter()
        .all(|event| event.direction == Direction::Serialize));
    assert_eq!(events[2].type_name, std::any::type_name::<str>());
}

#[test]
fn observer_by_reference() {
    let mut recorder = Recorder::new();

    {
        let mut serializer = Serializer::with_observer(Vec::new(), &mut recorder);
        (1u8, 2u8).serialize(&mut serializer).unwrap();
        'c'.serialize(&mut serializer).unwrap();
    }

    assert_eq!(recorder.shapes(), [Shape::Fixed, Shape::Fixed]);
}
