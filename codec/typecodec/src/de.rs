//! Reading values from a byte source.
//!
//! [`Deserializer`] wraps any [`Read`] implementation, counts the bytes it
//! consumes and checks every count prefix against its [`Config`] before a
//! destination is grown for it. [`Deserialize`] is implemented for every type
//! whose [`Classify::Shape`] has a [`DeserializeStrategy`] for it.

use std::io::{self, Read};

use crate::{
    config::Config,
    error::{Error, Result},
    observe::{Direction, Event, Observer},
    plain::Plain,
    shape::{Classify, Shape},
    strategy::DeserializeStrategy,
};

/// A reader that counts consumed bytes and stops at an optional limit.
#[derive(Debug)]
struct Source<R> {
    inner: R,
    consumed: u64,
    limit: Option<u64>,
}

impl<R> Source<R> {
    fn remaining(&self) -> Option<u64> {
        self.limit.map(|limit| limit.saturating_sub(self.consumed))
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let buf = match self.remaining() {
            Some(remaining) => {
                let max = usize::try_from(remaining).unwrap_or(usize::MAX);
                let len = buf.len().min(max);
                &mut buf[..len]
            }
            None => buf,
        };

        let read = self.inner.read(buf)?;
        self.consumed += read as u64;

        Ok(read)
    }
}

/// Reads encoded values from any [`Read`] implementation.
///
/// The deserializer reads exactly the bytes of the values it decodes and
/// never seeks or closes the reader.
#[derive(Debug)]
pub struct Deserializer<R, O = ()> {
    source: Source<R>,
    config: Config,
    observer: O,
    depth: usize,
}

impl<R: Read> Deserializer<R, ()> {
    /// Creates a deserializer that reads from `reader` with the default
    /// [`Config`].
    pub fn new(reader: R) -> Self { Self::with_config(reader, Config::default()) }

    /// Creates a deserializer that reads from `reader` with the given
    /// [`Config`].
    pub const fn with_config(reader: R, config: Config) -> Self {
        Self::with_observer(reader, config, ())
    }
}

impl<R: Read, O: Observer> Deserializer<R, O> {
    /// Creates a deserializer that reads from `reader` with the given
    /// [`Config`] and reports every dispatched value to `observer`.
    pub const fn with_observer(reader: R, config: Config, observer: O) -> Self {
        Self {
            source: Source {
                inner: reader,
                consumed: 0,
                limit: config.byte_limit(),
            },
            config,
            observer,
            depth: 0,
        }
    }

    /// Consumes the deserializer and returns the underlying reader.
    pub fn into_inner(self) -> R { self.source.inner }

    /// Consumes the deserializer and returns the underlying reader and
    /// observer.
    pub fn into_parts(self) -> (R, O) { (self.source.inner, self.observer) }

    /// Gets a reference to the underlying reader.
    pub const fn reader(&self) -> &R { &self.source.inner }

    /// Gets a mutable reference to the underlying reader.
    pub fn reader_mut(&mut self) -> &mut R { &mut self.source.inner }

    /// Gets a reference to the observer.
    pub const fn observer(&self) -> &O { &self.observer }

    /// Gets a mutable reference to the observer.
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    /// Gets the configuration of the deserializer.
    pub const fn config(&self) -> &Config { &self.config }

    /// Returns the number of bytes consumed so far.
    pub const fn consumed(&self) -> u64 { self.source.consumed }

    /// Returns the number of bytes left within the byte limit, if any.
    pub fn remaining(&self) -> Option<u64> { self.source.remaining() }

    /// Reads the raw bytes of a fixed-size value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the reader fails or ends early, and
    /// [`Error::InvalidValue`] if the bytes are not a valid `T`.
    pub fn expect_plain<T: Plain>(&mut self) -> Result<T> {
        T::read_plain(&mut self.source)
    }

    /// Reads a 4-byte count prefix of a string or container whose elements
    /// occupy at least `min_element_len` bytes each, and checks it against
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthLimit`] if the count exceeds
    /// [`Config::max_length`] and [`Error::InsufficientInput`] if the bytes
    /// left within the byte limit cannot hold that many elements.
    pub fn expect_count(&mut self, min_element_len: usize) -> Result<u32> {
        let len = self.expect_plain::<u32>()?;

        let limit = self.config.max_length();
        if len > limit {
            log::debug!("rejected count {len}: exceeds maximum of {limit}");
            return Err(Error::LengthLimit { len, limit });
        }

        if let Some(remaining) = self.remaining() {
            let required = u64::from(len).saturating_mul(min_element_len as u64);

            if required > remaining {
                log::debug!(
                    "rejected count {len}: needs {required} bytes, {remaining} \
                     left"
                );
                return Err(Error::InsufficientInput { len, required, remaining });
            }
        }

        Ok(len)
    }

    /// Reads exactly `len` raw bytes and appends them to `buffer`.
    ///
    /// The buffer grows as bytes arrive rather than up front, so a stream that
    /// ends early fails before a large count is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the reader fails or ends early.
    pub fn expect_bytes(&mut self, buffer: &mut Vec<u8>, len: u32) -> Result<()> {
        if len == 0 {
            return Ok(());
        }

        let len = u64::from(len);
        let read = (&mut self.source).take(len).read_to_end(buffer)?;

        if (read as u64) < len {
            return Err(Error::Io(io::ErrorKind::UnexpectedEof.into()));
        }

        Ok(())
    }

    /// Returns how many of `len` elements of type `E` may be reserved before
    /// any of them is read.
    pub(crate) fn preallocation<E>(&self, len: u32) -> usize {
        let by_size = self.config.max_preallocation_bytes()
            / std::mem::size_of::<E>().max(1);

        (len as usize).min(self.config.max_preallocation()).min(by_size)
    }

    /// Reports the dispatch of a value of type `T` to the observer.
    pub(crate) fn notify<T: ?Sized>(&mut self, shape: Shape, len: Option<u32>) {
        self.observer.observe(&Event {
            direction: Direction::Deserialize,
            shape,
            type_name: std::any::type_name::<T>(),
            len,
            depth: self.depth,
        });
    }

    /// Runs `f` one container level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }
}

/// A type that can be read by a [`Deserializer`].
///
/// This trait is implemented for every type whose [`Classify::Shape`] provides
/// a [`DeserializeStrategy`] for it; it is not meant to be implemented by hand.
pub trait Deserialize: Sized {
    /// The fewest bytes an encoded value of this type can occupy.
    const MIN_ENCODED_LEN: usize;

    /// Reads a new value from the deserializer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the reader fails or ends early, and the
    /// validation errors of [`Error`] if the bytes do not describe a valid
    /// value.
    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<Self>;

    /// Reads a value from the deserializer into `self`, discarding whatever
    /// `self` held before.
    ///
    /// # Errors
    ///
    /// See [`Deserialize::deserialize`]. On failure the content of `self` is
    /// unspecified.
    fn deserialize_in_place<R: Read, O: Observer>(
        &mut self,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()>;
}

impl<T> Deserialize for T
where
    T: Classify,
    T::Shape: DeserializeStrategy<T>,
{
    const MIN_ENCODED_LEN: usize =
        <T::Shape as DeserializeStrategy<T>>::MIN_ENCODED_LEN;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<Self> {
        <T::Shape as DeserializeStrategy<T>>::deserialize(deserializer)
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        &mut self,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        <T::Shape as DeserializeStrategy<T>>::deserialize_in_place(
            self,
            deserializer,
        )
    }
}
