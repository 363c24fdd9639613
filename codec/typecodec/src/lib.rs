//! Shape-driven binary serialization.
//!
//! Every supported type is classified into exactly one [`Shape`]: a fixed-size
//! scalar, a text string, a sequential container, a set-like container or a
//! map-like container. The shape selects the encoding strategy at compile time
//! through the [`Classify`] trait, so callers never say *how* a value is
//! written; they only call [`write`] and [`read`].
//!
//! # Wire Format
//!
//! ```text
//! value            ::= fixed_bytes | string | sequence | set | map
//! fixed_bytes      ::= <Plain::SIZE raw bytes>
//! string           ::= count:u32 <count raw bytes>
//! sequence | set   ::= count:u32 (element)*count
//! map              ::= count:u32 (key value)*count
//! ```
//!
//! All multi-byte integers, including the count prefixes, are written in the
//! host byte order. There is no header and no version tag: a stream is only
//! meaningful to a reader that knows the exact type it decodes into.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let map = BTreeMap::from([(1, "one".to_string()), (2, "two".to_string())]);
//!
//! let bytes = typecodec::to_bytes(&map).unwrap();
//! let decoded: BTreeMap<i32, String> = typecodec::from_bytes(&bytes).unwrap();
//!
//! assert_eq!(decoded, map);
//! ```

// this allows to use `typecodec` as a crate name inside derived code
extern crate self as typecodec;

use std::io::{Read, Write};

pub use config::Config;
pub use de::{Deserialize, Deserializer};
pub use error::{Error, Result};
pub use observe::Observer;
pub use plain::Plain;
pub use ser::{Serialize, Serializer};
pub use shape::{shape_of, Classify, MapLike, Sequential, SetLike, Shape};
pub use typecodec_derive::Plain;

pub mod config;
pub mod de;
pub mod error;
pub mod observe;
pub mod plain;
pub mod ser;
pub mod shape;
pub mod strategy;

/// Writes the encoding of `value` to `sink`.
///
/// The sink is only appended to; it is neither flushed nor closed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the sink rejects a write and
/// [`Error::LengthOverflow`] if a string or container is too long for its
/// 4-byte count prefix.
pub fn write<T: Serialize + ?Sized, W: Write>(value: &T, sink: W) -> Result<()> {
    value.serialize(&mut Serializer::new(sink))
}

/// Reads a value of type `T` from `source` using the default [`Config`].
///
/// # Errors
///
/// Returns [`Error::Io`] if the source fails or ends early, and the
/// validation errors of [`Error`] if the bytes do not describe a valid `T`.
pub fn read<T: Deserialize, R: Read>(source: R) -> Result<T> {
    T::deserialize(&mut Deserializer::new(source))
}

/// Reads a value from `source` into an existing `destination`.
///
/// Containers and strings are cleared before they are populated, so nothing
/// that `destination` held before survives a successful call. After a failed
/// call the content of `destination` is unspecified.
///
/// # Errors
///
/// See [`read`].
pub fn read_into<T: Deserialize, R: Read>(
    destination: &mut T,
    source: R,
) -> Result<()> {
    destination.deserialize_in_place(&mut Deserializer::new(source))
}

/// Encodes `value` into a freshly allocated buffer.
///
/// # Errors
///
/// See [`write`].
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut serializer = Serializer::new(Vec::new());
    value.serialize(&mut serializer)?;

    Ok(serializer.into_inner())
}

/// Decodes a value of type `T` that spans exactly `bytes`.
///
/// Every count prefix is checked against the number of bytes left in the
/// slice before anything is allocated for it.
///
/// # Errors
///
/// Besides the errors of [`read`], returns [`Error::TrailingBytes`] if the
/// value ends before the slice does.
pub fn from_bytes<T: Deserialize>(bytes: &[u8]) -> Result<T> {
    let config = Config::builder().byte_limit(bytes.len() as u64).build();
    let mut deserializer = Deserializer::with_config(bytes, config);
    let value = T::deserialize(&mut deserializer)?;

    let remaining = deserializer.into_inner().len();
    if remaining != 0 {
        return Err(Error::TrailingBytes { remaining });
    }

    Ok(value)
}
