//! Diagnostic tracing of the dispatch.
//!
//! A [`crate::Serializer`] or [`crate::Deserializer`] notifies its
//! [`Observer`] once for every value it dispatches, naming the shape chosen for
//! the value's type. The default observer `()` ignores every event.

use crate::shape::Shape;

/// Whether an [`Event`] was raised while writing or while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// The value is being written to a sink.
    Serialize,

    /// The value is being read from a source.
    Deserialize,
}

/// A single dispatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    /// Whether the value is written or read.
    pub direction: Direction,

    /// The shape the value's type is classified as.
    pub shape: Shape,

    /// The name of the value's type.
    pub type_name: &'static str,

    /// The count prefix of the value, if its shape has one.
    pub len: Option<u32>,

    /// How many containers enclose the value.
    pub depth: usize,
}

/// Receives an [`Event`] for every dispatched value.
pub trait Observer {
    /// Called once per value, before its elements (if any) are dispatched.
    fn observe(&mut self, event: &Event);
}

impl Observer for () {
    fn observe(&mut self, _: &Event) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, event: &Event) { (**self).observe(event) }
}

/// Forwards every event to the [`log`] facade at the trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, event: &Event) {
        let verb = match event.direction {
            Direction::Serialize => "serialize",
            Direction::Deserialize => "deserialize",
        };

        match event.len {
            Some(len) => log::trace!(
                "{:indent$}{verb} {} as {} ({len} elements)",
                "",
                event.type_name,
                event.shape,
                indent = event.depth * 2,
            ),
            None => log::trace!(
                "{:indent$}{verb} {} as {}",
                "",
                event.type_name,
                event.shape,
                indent = event.depth * 2,
            ),
        }
    }
}

/// Collects every event it observes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self { Self { events: Vec::new() } }

    /// Returns the events observed so far, in dispatch order.
    #[must_use]
    pub fn events(&self) -> &[Event] { &self.events }

    /// Returns the shapes observed so far, in dispatch order.
    #[must_use]
    pub fn shapes(&self) -> Vec<Shape> {
        self.events.iter().map(|event| event.shape).collect()
    }

    /// Consumes the recorder and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> { self.events }
}

impl Observer for Recorder {
    fn observe(&mut self, event: &Event) { self.events.push(*event); }
}

#[cfg(test)]
mod test;
