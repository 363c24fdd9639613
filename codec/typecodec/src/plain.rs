//! Fixed-size scalars.
//!
//! [`Plain`] is the allow-list of types written as their raw bytes. Nothing is
//! treated as fixed-size unless it implements this trait: primitives, arrays
//! and tuples of plain types are registered here, and user records register
//! through `#[derive(Plain)]`.
//!
//! Composite plain types are written component by component, each in the host
//! byte order. For arrays this is exactly their in-memory representation; for
//! tuples and records it is the representation of a `#[repr(C)]` struct without
//! padding. Padding bytes are never written.

use std::{
    io::{self, Read, Write},
    marker::PhantomData,
};

use crate::{
    error::{Error, Result},
    shape::{Classify, Fixed},
};

/// A fixed-size scalar written as exactly [`Plain::SIZE`] raw bytes.
///
/// # Examples
///
/// ```rust
/// use typecodec::Plain;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Plain)]
/// #[repr(C)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// assert_eq!(Point::SIZE, 8);
///
/// let point = Point { x: 517, y: -1 };
/// let bytes = typecodec::to_bytes(&point).unwrap();
///
/// assert_eq!(&bytes[..4], &517i32.to_ne_bytes());
/// assert_eq!(typecodec::from_bytes::<Point>(&bytes).unwrap(), point);
/// ```
pub trait Plain: Sized {
    /// The number of bytes the value occupies on the wire.
    const SIZE: usize;

    /// Writes the raw bytes of the value.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the write.
    fn write_plain<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()>;

    /// Reads exactly [`Plain::SIZE`] bytes and rebuilds the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source ends early and
    /// [`Error::InvalidValue`] if the bytes are not a valid value.
    fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self>;
}

macro_rules! impl_plain_number {
    ($($ty:ty),*) => {
        $(
            impl Plain for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn write_plain<W: Write + ?Sized>(
                    &self,
                    sink: &mut W,
                ) -> io::Result<()> {
                    sink.write_all(&self.to_ne_bytes())
                }

                fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    source.read_exact(&mut bytes)?;
                    Ok(<$ty>::from_ne_bytes(bytes))
                }
            }

            impl Classify for $ty {
                type Shape = Fixed;
            }
        )*
    };
}

impl_plain_number! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64
}

impl Plain for bool {
    const SIZE: usize = 1;

    fn write_plain<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&[u8::from(*self)])
    }

    fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        match u8::read_plain(source)? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(Error::invalid_value::<Self>(format_args!(
                "byte {byte:#04x} is neither 0 nor 1"
            ))),
        }
    }
}

impl Classify for bool {
    type Shape = Fixed;
}

impl Plain for char {
    const SIZE: usize = 4;

    fn write_plain<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        u32::from(*self).write_plain(sink)
    }

    fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        let scalar = u32::read_plain(source)?;

        Self::from_u32(scalar).ok_or_else(|| {
            Error::invalid_value::<Self>(format_args!(
                "{scalar:#x} is not a unicode scalar value"
            ))
        })
    }
}

impl Classify for char {
    type Shape = Fixed;
}

impl Plain for () {
    const SIZE: usize = 0;

    fn write_plain<W: Write + ?Sized>(&self, _: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn read_plain<R: Read + ?Sized>(_: &mut R) -> Result<Self> { Ok(()) }
}

impl Classify for () {
    type Shape = Fixed;
}

impl<T: ?Sized> Plain for PhantomData<T> {
    const SIZE: usize = 0;

    fn write_plain<W: Write + ?Sized>(&self, _: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn read_plain<R: Read + ?Sized>(_: &mut R) -> Result<Self> {
        Ok(PhantomData)
    }
}

impl<T: ?Sized> Classify for PhantomData<T> {
    type Shape = Fixed;
}

impl<T: Plain, const N: usize> Plain for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn write_plain<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        for element in self {
            element.write_plain(sink)?;
        }

        Ok(())
    }

    fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            elements.push(T::read_plain(source)?);
        }

        elements.try_into().map_err(|elements: Vec<T>| {
            Error::invalid_value::<Self>(format_args!(
                "expected {N} elements, got {}",
                elements.len()
            ))
        })
    }
}

impl<T: Plain, const N: usize> Classify for [T; N] {
    type Shape = Fixed;
}

macro_rules! impl_plain_tuple {
    ($(($($idx:tt $T:ident),+)),*) => {
        $(
            impl<$($T: Plain),+> Plain for ($($T,)+) {
                const SIZE: usize = 0 $(+ $T::SIZE)+;

                fn write_plain<W: Write + ?Sized>(
                    &self,
                    sink: &mut W,
                ) -> io::Result<()> {
                    $(self.$idx.write_plain(sink)?;)+
                    Ok(())
                }

                fn read_plain<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
                    Ok(($($T::read_plain(source)?,)+))
                }
            }

            impl<$($T: Plain),+> Classify for ($($T,)+) {
                type Shape = Fixed;
            }
        )*
    };
}

impl_plain_tuple! {
    (0 T0),
    (0 T0, 1 T1),
    (0 T0, 1 T1, 2 T2),
    (0 T0, 1 T1, 2 T2, 3 T3),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10),
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10, 11 T11)
}
