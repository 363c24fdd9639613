//! The five encoding strategies, one per shape marker.
//!
//! [`SerializeStrategy`] and [`DeserializeStrategy`] are implemented by the
//! markers of [`crate::shape`]; the blanket [`crate::Serialize`] and
//! [`crate::Deserialize`] implementations pick the strategy through
//! [`crate::Classify::Shape`]. Container strategies recurse through those
//! blanket implementations for their elements, keys and values, so nested
//! containers and strings are handled uniformly.

use std::io::{Read, Write};

use crate::{
    de::{Deserialize, Deserializer},
    error::{Error, Result},
    observe::Observer,
    plain::Plain,
    ser::{Serialize, Serializer},
    shape::{Fixed, Map, MapLike, Sequence, Sequential, Set, SetLike, Shape, Text},
};

/// The size of every count prefix.
pub const COUNT_LEN: usize = std::mem::size_of::<u32>();

/// Writes values of type `T`.
pub trait SerializeStrategy<T: ?Sized> {
    /// Writes `value` to the serializer.
    ///
    /// # Errors
    ///
    /// See [`crate::Serialize::serialize`].
    fn serialize<W: Write, O: Observer>(
        value: &T,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()>;
}

/// Reads values of type `T`.
pub trait DeserializeStrategy<T> {
    /// The fewest bytes an encoded `T` can occupy.
    const MIN_ENCODED_LEN: usize;

    /// Reads a new value from the deserializer.
    ///
    /// # Errors
    ///
    /// See [`crate::Deserialize::deserialize`].
    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<T>;

    /// Reads a value into `destination`, clearing it first.
    ///
    /// # Errors
    ///
    /// See [`crate::Deserialize::deserialize`].
    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut T,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()>;
}

// =============================================================================
// Fixed-Size Scalars
// =============================================================================

impl<T: Plain> SerializeStrategy<T> for Fixed {
    fn serialize<W: Write, O: Observer>(
        value: &T,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        serializer.notify::<T>(Shape::Fixed, None);
        serializer.emit_plain(value)
    }
}

impl<T: Plain> DeserializeStrategy<T> for Fixed {
    const MIN_ENCODED_LEN: usize = T::SIZE;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<T> {
        deserializer.notify::<T>(Shape::Fixed, None);
        deserializer.expect_plain()
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut T,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        *destination =
            <Self as DeserializeStrategy<T>>::deserialize(deserializer)?;
        Ok(())
    }
}

// =============================================================================
// Strings
// =============================================================================

impl SerializeStrategy<str> for Text {
    fn serialize<W: Write, O: Observer>(
        value: &str,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        let len = serializer.emit_count(value.len())?;
        serializer.notify::<str>(Shape::Text, Some(len));
        serializer.emit_bytes(value.as_bytes())
    }
}

impl SerializeStrategy<String> for Text {
    fn serialize<W: Write, O: Observer>(
        value: &String,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        <Self as SerializeStrategy<str>>::serialize(value.as_str(), serializer)
    }
}

impl DeserializeStrategy<String> for Text {
    const MIN_ENCODED_LEN: usize = COUNT_LEN;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<String> {
        let mut string = String::new();
        Self::deserialize_in_place(&mut string, deserializer)?;

        Ok(string)
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut String,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        destination.clear();

        let len = deserializer.expect_count(1)?;
        deserializer.notify::<String>(Shape::Text, Some(len));

        // reuse the allocation of the destination
        let mut bytes = std::mem::take(destination).into_bytes();
        deserializer.expect_bytes(&mut bytes, len)?;

        *destination =
            String::from_utf8(bytes).map_err(Error::invalid_value::<String>)?;

        Ok(())
    }
}

// =============================================================================
// Sequential Containers
// =============================================================================

impl<C> SerializeStrategy<C> for Sequence
where
    C: Sequential,
    C::Element: Serialize,
{
    fn serialize<W: Write, O: Observer>(
        value: &C,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        let len = serializer.emit_count(value.len())?;
        serializer.notify::<C>(Shape::Sequence, Some(len));

        serializer.nested(|serializer| {
            for element in value.elements() {
                element.serialize(serializer)?;
            }

            Ok(())
        })
    }
}

impl<C> DeserializeStrategy<C> for Sequence
where
    C: Sequential,
    C::Element: Deserialize,
{
    const MIN_ENCODED_LEN: usize = COUNT_LEN;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<C> {
        let mut container = C::default();
        <Self as DeserializeStrategy<C>>::deserialize_in_place(
            &mut container,
            deserializer,
        )?;

        Ok(container)
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut C,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        destination.clear();

        let len = deserializer
            .expect_count(<C::Element as Deserialize>::MIN_ENCODED_LEN)?;
        deserializer.notify::<C>(Shape::Sequence, Some(len));
        destination.reserve(deserializer.preallocation::<C::Element>(len));

        deserializer.nested(|deserializer| {
            for _ in 0..len {
                destination
                    .push_back(<C::Element as Deserialize>::deserialize(
                        deserializer,
                    )?);
            }

            Ok(())
        })
    }
}

// =============================================================================
// Set-Like Containers
// =============================================================================

impl<C> SerializeStrategy<C> for Set
where
    C: SetLike,
    C::Element: Serialize,
{
    fn serialize<W: Write, O: Observer>(
        value: &C,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        let len = serializer.emit_count(value.len())?;
        serializer.notify::<C>(Shape::Set, Some(len));

        serializer.nested(|serializer| {
            for element in value.elements() {
                element.serialize(serializer)?;
            }

            Ok(())
        })
    }
}

impl<C> DeserializeStrategy<C> for Set
where
    C: SetLike,
    C::Element: Deserialize,
{
    const MIN_ENCODED_LEN: usize = COUNT_LEN;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<C> {
        let mut container = C::default();
        <Self as DeserializeStrategy<C>>::deserialize_in_place(
            &mut container,
            deserializer,
        )?;

        Ok(container)
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut C,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        destination.clear();

        let len = deserializer
            .expect_count(<C::Element as Deserialize>::MIN_ENCODED_LEN)?;
        deserializer.notify::<C>(Shape::Set, Some(len));
        destination.reserve(deserializer.preallocation::<C::Element>(len));

        deserializer.nested(|deserializer| {
            for _ in 0..len {
                // a duplicate is dropped exactly as any other insertion would
                destination.insert(<C::Element as Deserialize>::deserialize(
                    deserializer,
                )?);
            }

            Ok(())
        })
    }
}

// =============================================================================
// Map-Like Containers
// =============================================================================

impl<C> SerializeStrategy<C> for Map
where
    C: MapLike,
    C::Key: Serialize,
    C::Value: Serialize,
{
    fn serialize<W: Write, O: Observer>(
        value: &C,
        serializer: &mut Serializer<W, O>,
    ) -> Result<()> {
        let len = serializer.emit_count(value.len())?;
        serializer.notify::<C>(Shape::Map, Some(len));

        serializer.nested(|serializer| {
            for (key, mapped) in value.entries() {
                key.serialize(serializer)?;
                mapped.serialize(serializer)?;
            }

            Ok(())
        })
    }
}

impl<C> DeserializeStrategy<C> for Map
where
    C: MapLike,
    C::Key: Deserialize,
    C::Value: Deserialize,
{
    const MIN_ENCODED_LEN: usize = COUNT_LEN;

    fn deserialize<R: Read, O: Observer>(
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<C> {
        let mut container = C::default();
        <Self as DeserializeStrategy<C>>::deserialize_in_place(
            &mut container,
            deserializer,
        )?;

        Ok(container)
    }

    fn deserialize_in_place<R: Read, O: Observer>(
        destination: &mut C,
        deserializer: &mut Deserializer<R, O>,
    ) -> Result<()> {
        destination.clear();

        let len = deserializer.expect_count(
            <C::Key as Deserialize>::MIN_ENCODED_LEN
                + <C::Value as Deserialize>::MIN_ENCODED_LEN,
        )?;
        deserializer.notify::<C>(Shape::Map, Some(len));
        destination
            .reserve(deserializer.preallocation::<(C::Key, C::Value)>(len));

        deserializer.nested(|deserializer| {
            for _ in 0..len {
                let key = <C::Key as Deserialize>::deserialize(deserializer)?;
                let value =
                    <C::Value as Deserialize>::deserialize(deserializer)?;

                destination.insert(key, value);
            }

            Ok(())
        })
    }
}
