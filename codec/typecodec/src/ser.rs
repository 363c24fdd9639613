//! Writing values to a byte sink.
//!
//! [`Serializer`] wraps any [`Write`] implementation and provides the three
//! primitives every strategy is built from: raw fixed-size bytes, count
//! prefixes and raw byte runs. [`Serialize`] is implemented for every type
//! whose [`Classify::Shape`] has a [`SerializeStrategy`] for it.
//!
//! # Examples
//!
//! ```rust
//! use typecodec::{Serialize, Serializer};
//!
//! let mut serializer = Serializer::new(Vec::new());
//!
//! 517i32.serialize(&mut serializer).unwrap();
//! "hello".serialize(&mut serializer).unwrap();
//!
//! let buffer = serializer.into_inner();
//!
//! assert_eq!(&buffer[..4], &517i32.to_ne_bytes());
//! assert_eq!(&buffer[4..8], &5u32.to_ne_bytes());
//! assert_eq!(&buffer[8..], b"hello");
//! ```

use std::io::Write;

use crate::{
    error::{Error, Result},
    observe::{Direction, Event, Observer},
    plain::Plain,
    shape::{Classify, Shape},
    strategy::SerializeStrategy,
};

/// Writes encoded values to any [`Write`] implementation.
///
/// The serializer never flushes, seeks or closes the writer; it only appends.
#[derive(Debug)]
pub struct Serializer<W, O = ()> {
    writer: W,
    observer: O,
    depth: usize,
}

impl<W: Write> Serializer<W, ()> {
    /// Creates a serializer that writes to `writer` without an observer.
    pub const fn new(writer: W) -> Self {
        Self { writer, observer: (), depth: 0 }
    }
}

impl<W: Write, O: Observer> Serializer<W, O> {
    /// Creates a serializer that writes to `writer` and reports every
    /// dispatched value to `observer`.
    pub const fn with_observer(writer: W, observer: O) -> Self {
        Self { writer, observer, depth: 0 }
    }

    /// Consumes the serializer and returns the underlying writer.
    pub fn into_inner(self) -> W { self.writer }

    /// Consumes the serializer and returns the underlying writer and observer.
    pub fn into_parts(self) -> (W, O) { (self.writer, self.observer) }

    /// Gets a reference to the underlying writer.
    pub const fn writer(&self) -> &W { &self.writer }

    /// Gets a mutable reference to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W { &mut self.writer }

    /// Gets a reference to the observer.
    pub const fn observer(&self) -> &O { &self.observer }

    /// Gets a mutable reference to the observer.
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    /// Writes the raw bytes of a fixed-size value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the writer fails.
    pub fn emit_plain<T: Plain>(&mut self, value: &T) -> Result<()> {
        value.write_plain(&mut self.writer)?;
        Ok(())
    }

    /// Writes `len` as a 4-byte count prefix and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthOverflow`] without writing anything if `len`
    /// does not fit in a `u32`, and [`Error::Io`] if the writer fails.
    pub fn emit_count(&mut self, len: usize) -> Result<u32> {
        let count =
            u32::try_from(len).map_err(|_| Error::LengthOverflow { len })?;
        self.emit_plain(&count)?;

        Ok(count)
    }

    /// Writes a run of raw bytes without any prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the writer fails.
    pub fn emit_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if !bytes.is_empty() {
            self.writer.write_all(bytes)?;
        }

        Ok(())
    }

    /// Reports the dispatch of a value of type `T` to the observer.
    pub(crate) fn notify<T: ?Sized>(&mut self, shape: Shape, len: Option<u32>) {
        self.observer.observe(&Event {
            direction: Direction::Serialize,
            shape,
            type_name: std::any::type_name::<T>(),
            len,
            depth: self.depth,
        });
    }

    /// Runs `f` one container level deeper.
    pub(crate) fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }
}

/// A type that can be written by a [`Serializer`].
///
/// This trait is implemented for every type whose [`Classify::Shape`] provides
/// a [`SerializeStrategy`] for it; it is not meant to be implemented by hand.
pub trait Serialize {
    /// Writes this value to the serializer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the writer fails and [`Error::LengthOverflow`]
    /// if a string or container is too long for its count prefix.
    fn serialize<W: Write, O: Observer>(
        &self,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()>;
}

impl<T> Serialize for T
where
    T: Classify + ?Sized,
    T::Shape: SerializeStrategy<T>,
{
    fn serialize<W: Write, O: Observer>(
        &self,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        <T::Shape as SerializeStrategy<T>>::serialize(self, serializer)
    }
}

#[cfg(test)]
mod test;
