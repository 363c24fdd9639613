//! Tests for `#[derive(Plain)]`.

// the expansion for a unit struct must not leave its parameters unused
#![deny(unused_variables)]

use std::marker::PhantomData;

use typecodec::{Error, Plain, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Plain)]
#[repr(C)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Plain)]
struct Sample(u8, f64, bool);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Plain)]
struct Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Plain)]
struct Pair<T> {
    first: T,
    second: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Plain)]
struct Tagged<T> {
    tag: [u8; 4],
    value: u16,
    marker: PhantomData<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Plain)]
struct Segment {
    from: Point,
    to: Point,
    label: char,
}

#[test]
fn sizes_are_sums_of_fields() {
    assert_eq!(Point::SIZE, 8);
    assert_eq!(Sample::SIZE, 10);
    assert_eq!(Marker::SIZE, 0);
    assert_eq!(Pair::<u64>::SIZE, 16);
    assert_eq!(Tagged::<String>::SIZE, 6);
    assert_eq!(Segment::SIZE, 20);
}

#[test]
fn classified_as_fixed() {
    assert_eq!(typecodec::shape_of::<Point>(), Shape::Fixed);
    assert_eq!(typecodec::shape_of::<Pair<char>>(), Shape::Fixed);
    assert_eq!(typecodec::shape_of::<Vec<Point>>(), Shape::Sequence);
}

#[test]
fn fields_in_declaration_order() {
    let bytes = typecodec::to_bytes(&Point { x: 517, y: -1 }).unwrap();

    assert_eq!(&bytes[..4], &517i32.to_ne_bytes());
    assert_eq!(&bytes[4..], &(-1i32).to_ne_bytes());
}

#[test]
fn no_padding() {
    let sample = Sample(7, 0.25, true);
    let bytes = typecodec::to_bytes(&sample).unwrap();

    assert_eq!(bytes.len(), 10);
    assert_eq!(bytes[0], 7);
    assert_eq!(&bytes[1..9], &0.25f64.to_ne_bytes());
    assert_eq!(bytes[9], 1);
}

#[test]
fn round_trips() {
    let point = Point { x: 1, y: 2 };
    assert_eq!(
        typecodec::from_bytes::<Point>(&typecodec::to_bytes(&point).unwrap())
            .unwrap(),
        point
    );

    let sample = Sample(255, -3.5, false);
    assert_eq!(
        typecodec::from_bytes::<Sample>(&typecodec::to_bytes(&sample).unwrap())
            .unwrap(),
        sample
    );

    assert!(typecodec::to_bytes(&Marker).unwrap().is_empty());
    assert_eq!(typecodec::from_bytes::<Marker>(&[]).unwrap(), Marker);

    let pair = Pair { first: 'a', second: '🦀' };
    assert_eq!(
        typecodec::from_bytes::<Pair<char>>(&typecodec::to_bytes(&pair).unwrap())
            .unwrap(),
        pair
    );

    let tagged = Tagged::<Vec<u8>> {
        tag: *b"TAG\0",
        value: 9,
        marker: PhantomData,
    };
    assert_eq!(
        typecodec::from_bytes::<Tagged<Vec<u8>>>(
            &typecodec::to_bytes(&tagged).unwrap()
        )
        .unwrap(),
        tagged
    );

    let segments = vec![
        Segment {
            from: Point { x: 0, y: 0 },
            to: Point { x: 3, y: 4 },
            label: 'a',
        },
        Segment {
            from: Point { x: -1, y: -1 },
            to: Point { x: 1, y: 1 },
            label: 'b',
        },
    ];
    assert_eq!(
        typecodec::from_bytes::<Vec<Segment>>(
            &typecodec::to_bytes(&segments).unwrap()
        )
        .unwrap(),
        segments
    );
}

#[test]
fn invalid_field() {
    let mut bytes = typecodec::to_bytes(&Sample(1, 1.0, true)).unwrap();
    bytes[9] = 2;

    let error = typecodec::from_bytes::<Sample>(&bytes).unwrap_err();

    assert!(matches!(error, Error::InvalidValue { type_name: "bool", .. }));
}

#[test]
fn truncated() {
    let bytes = typecodec::to_bytes(&Point { x: 1, y: 2 }).unwrap();
    let error = typecodec::from_bytes::<Point>(&bytes[..6]).unwrap_err();

    assert!(error.is_unexpected_eof());
}
