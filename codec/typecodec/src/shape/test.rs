use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    marker::PhantomData,
};

use super::*;

#[test]
fn fixed_size_types() {
    assert_eq!(shape_of::<u8>(), Shape::Fixed);
    assert_eq!(shape_of::<i32>(), Shape::Fixed);
    assert_eq!(shape_of::<u128>(), Shape::Fixed);
    assert_eq!(shape_of::<f64>(), Shape::Fixed);
    assert_eq!(shape_of::<bool>(), Shape::Fixed);
    assert_eq!(shape_of::<char>(), Shape::Fixed);
    assert_eq!(shape_of::<()>(), Shape::Fixed);
    assert_eq!(shape_of::<PhantomData<String>>(), Shape::Fixed);
    assert_eq!(shape_of::<[u8; 7]>(), Shape::Fixed);
    assert_eq!(shape_of::<(i32, i32)>(), Shape::Fixed);
    assert_eq!(shape_of::<[(u16, char); 3]>(), Shape::Fixed);
}

#[test]
fn text_takes_priority() {
    assert_eq!(shape_of::<String>(), Shape::Text);
    assert_eq!(shape_of::<str>(), Shape::Text);

    // the bytes of a string are a sequence only when spelled as one
    assert_eq!(shape_of::<Vec<u8>>(), Shape::Sequence);
}

#[test]
fn sequential_containers() {
    assert_eq!(shape_of::<Vec<i32>>(), Shape::Sequence);
    assert_eq!(shape_of::<VecDeque<String>>(), Shape::Sequence);
    assert_eq!(shape_of::<LinkedList<Vec<u8>>>(), Shape::Sequence);
}

#[test]
fn associative_containers() {
    assert_eq!(shape_of::<HashSet<i64>>(), Shape::Set);
    assert_eq!(shape_of::<BTreeSet<String>>(), Shape::Set);
    assert_eq!(shape_of::<HashMap<String, i32>>(), Shape::Map);
    assert_eq!(shape_of::<BTreeMap<(i32, i32), String>>(), Shape::Map);
}

#[test]
fn nested_containers_classify_by_outermost_type() {
    assert_eq!(
        shape_of::<Vec<HashMap<String, Vec<HashSet<i64>>>>>(),
        Shape::Sequence
    );
    assert_eq!(shape_of::<BTreeMap<i32, Vec<String>>>(), Shape::Map);
}

#[test]
fn labels() {
    let labels = [
        Shape::Fixed,
        Shape::Text,
        Shape::Sequence,
        Shape::Set,
        Shape::Map,
    ]
    .map(|shape| shape.to_string());

    assert_eq!(labels, ["fixed", "text", "sequence", "set", "map"]);
}

#[test]
fn count_prefix() {
    assert!(!Shape::Fixed.is_counted());
    assert!(Shape::Text.is_counted());
    assert!(Shape::Sequence.is_counted());
    assert!(Shape::Set.is_counted());
    assert!(Shape::Map.is_counted());
}

#[test]
fn capability_operations() {
    let mut vector = vec![1, 2, 3];
    Sequential::clear(&mut vector);
    Sequential::push_back(&mut vector, 4);
    assert_eq!(Sequential::len(&vector), 1);
    assert_eq!(Sequential::elements(&vector).copied().collect::<Vec<_>>(), [4]);

    let mut set = BTreeSet::<i32>::new();
    assert!(SetLike::insert(&mut set, 1));
    assert!(!SetLike::insert(&mut set, 1));
    assert_eq!(SetLike::len(&set), 1);

    let mut map = HashMap::<i32, i32>::new();
    MapLike::insert(&mut map, 1, 10);
    MapLike::insert(&mut map, 1, 20);
    assert_eq!(MapLike::len(&map), 1);
    assert_eq!(MapLike::entries(&map).collect::<Vec<_>>(), [(&1, &20)]);

    MapLike::clear(&mut map);
    assert!(MapLike::is_empty(&map));
}
