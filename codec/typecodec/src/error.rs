//! Contains the [`Error`] type returned by every encoding and decoding
//! operation.

use std::{fmt::Display, io};

/// An error raised while writing a value to a sink or reading it back.
///
/// A failed operation leaves the sink with a partial encoding, or the
/// destination with partially decoded content; neither should be used
/// afterwards.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying sink or source reported a failure.
    ///
    /// A stream that ends before a declared count is satisfied surfaces here
    /// with [`io::ErrorKind::UnexpectedEof`].
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// A string or container holds more elements than a 4-byte count prefix
    /// can describe.
    #[error("length {len} does not fit in a 4-byte count prefix")]
    LengthOverflow {
        /// The number of elements of the rejected value.
        len: usize,
    },

    /// A decoded count prefix exceeds [`crate::Config::max_length`].
    #[error("decoded length {len} exceeds the configured maximum of {limit}")]
    LengthLimit {
        /// The decoded count.
        len: u32,

        /// The configured maximum.
        limit: u32,
    },

    /// A decoded count prefix needs more bytes than the configured byte limit
    /// leaves available.
    #[error(
        "decoded length {len} needs at least {required} bytes but only \
         {remaining} are left"
    )]
    InsufficientInput {
        /// The decoded count.
        len: u32,

        /// The minimum number of bytes the count implies.
        required: u64,

        /// The number of bytes left within the byte limit.
        remaining: u64,
    },

    /// The decoded bytes are not a valid value of the target type.
    #[error("invalid `{type_name}` value: {reason}")]
    InvalidValue {
        /// The name of the type being decoded.
        type_name: &'static str,

        /// What made the bytes invalid.
        reason: String,
    },

    /// A value was decoded from a byte slice but did not consume all of it.
    #[error("{remaining} trailing bytes left after decoding")]
    TrailingBytes {
        /// The number of bytes left unread.
        remaining: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidValue`] for the type `T`.
    pub fn invalid_value<T: ?Sized>(reason: impl Display) -> Self {
        Self::InvalidValue {
            type_name: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if the source ended before the value was complete.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Self::Io(error) if error.kind() == io::ErrorKind::UnexpectedEof)
    }
}

/// The result type used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
