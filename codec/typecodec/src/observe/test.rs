use std::collections::BTreeSet;

use super::*;
use crate::{Deserialize, Deserializer, Serialize, Serializer};

fn event(shape: Shape, depth: usize) -> Event {
    Event {
        direction: Direction::Serialize,
        shape,
        type_name: "test",
        len: None,
        depth,
    }
}

#[test]
fn recorder_keeps_dispatch_order() {
    let mut recorder = Recorder::new();

    recorder.observe(&event(Shape::Map, 0));
    recorder.observe(&event(Shape::Text, 1));

    assert_eq!(recorder.shapes(), [Shape::Map, Shape::Text]);
    assert_eq!(recorder.events()[1].depth, 1);
}

#[test]
fn forwarding_through_references() {
    let mut recorder = Recorder::new();

    {
        let mut forward = &mut recorder;
        Observer::observe(&mut forward, &event(Shape::Fixed, 0));
    }

    assert_eq!(recorder.into_events().len(), 1);
}

#[test]
fn both_directions_agree() {
    let set = BTreeSet::from(["a".to_owned(), "b".to_owned()]);

    let mut serializer = Serializer::with_observer(Vec::new(), Recorder::new());
    set.serialize(&mut serializer).unwrap();
    let (bytes, written) = serializer.into_parts();

    let mut deserializer = Deserializer::with_observer(
        bytes.as_slice(),
        crate::Config::default(),
        Recorder::new(),
    );
    BTreeSet::<String>::deserialize(&mut deserializer).unwrap();
    let (_, read) = deserializer.into_parts();

    assert_eq!(written.shapes(), [Shape::Set, Shape::Text, Shape::Text]);
    assert_eq!(written.shapes(), read.shapes());
    assert!(read
        .events()
        .iter()
        .all(|event| event.direction == Direction::Deserialize));
}

#[test]
fn log_observer_accepts_every_event() {
    let mut observer = LogObserver;

    observer.observe(&event(Shape::Sequence, 3));
    observer.observe(&Event { len: Some(2), ..event(Shape::Text, 0) });
}
