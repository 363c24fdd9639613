//! The capability classifier.
//!
//! Every supported type implements [`Classify`] exactly once, naming one of
//! the five shape markers ([`Fixed`], [`Text`], [`Sequence`], [`Set`] and
//! [`Map`]) as its [`Classify::Shape`]. The marker selects the encoding
//! strategy in [`crate::strategy`]; the capability traits in this module
//! ([`Sequential`], [`SetLike`] and [`MapLike`]) and
//! [`crate::plain::Plain`] describe the structural operations each strategy
//! relies on.
//!
//! Because the shape is an associated type, a type can never be classified
//! twice. When a type exposes the operations of several shapes, the
//! classification resolves the overlap:
//!
//! - text wins over every container shape, so a string is written as one
//!   length followed by its bytes instead of element by element;
//! - associative containers are classified as [`Set`] or [`Map`], never as
//!   [`Sequence`], because they are rebuilt through keyed insertion rather
//!   than positional append;
//! - a container with a distinct mapped value and a key/value insertion is a
//!   [`Map`]; one whose elements are their own keys is a [`Set`].

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    fmt::Display,
    hash::{BuildHasher, Hash},
};

/// The runtime name of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    /// A fixed-size scalar written as its raw bytes.
    Fixed,

    /// A string written as a count followed by its bytes.
    Text,

    /// An ordered container rebuilt by appending at the end.
    Sequence,

    /// An associative container whose elements are their own keys.
    Set,

    /// An associative container of key/value entries.
    Map,
}

impl Shape {
    /// Returns the lowercase label of the shape.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::Map => "map",
        }
    }

    /// Returns `true` if values of this shape start with a count prefix.
    #[must_use]
    pub const fn is_counted(self) -> bool { !matches!(self, Self::Fixed) }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

mod sealed {
    /// Restricts [`super::ShapeKind`] to the markers of this module.
    pub trait Sealed {}
}

/// Implemented by the five shape markers.
///
/// This trait is sealed; the set of shapes is closed.
pub trait ShapeKind: sealed::Sealed {
    /// The runtime name of the shape.
    const SHAPE: Shape;
}

/// The shape marker of fixed-size scalars. See [`crate::plain::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed;

/// The shape marker of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Text;

/// The shape marker of sequential containers. See [`Sequential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sequence;

/// The shape marker of set-like containers. See [`SetLike`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Set;

/// The shape marker of map-like containers. See [`MapLike`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Map;

macro_rules! impl_shape_kind {
    ($($marker:ident => $shape:ident),*) => {
        $(
            impl sealed::Sealed for $marker {}

            impl ShapeKind for $marker {
                const SHAPE: Shape = Shape::$shape;
            }
        )*
    };
}

impl_shape_kind! {
    Fixed => Fixed,
    Text => Text,
    Sequence => Sequence,
    Set => Set,
    Map => Map
}

/// Assigns a type to exactly one shape.
///
/// # Examples
///
/// A custom container joins the dispatch by implementing the capability trait
/// of its shape and naming the shape here:
///
/// ```rust
/// use typecodec::{shape::Sequence, Classify, Sequential};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Stack(Vec<u16>);
///
/// impl Sequential for Stack {
///     type Element = u16;
///
///     fn len(&self) -> usize { self.0.len() }
///
///     fn elements(&self) -> impl Iterator<Item = &u16> { self.0.iter() }
///
///     fn clear(&mut self) { self.0.clear() }
///
///     fn push_back(&mut self, element: u16) { self.0.push(element) }
/// }
///
/// impl Classify for Stack {
///     type Shape = Sequence;
/// }
///
/// let stack = Stack(vec![3, 1, 2]);
/// let bytes = typecodec::to_bytes(&stack).unwrap();
///
/// assert_eq!(typecodec::from_bytes::<Stack>(&bytes).unwrap(), stack);
/// ```
pub trait Classify {
    /// The shape marker selecting the encoding strategy.
    type Shape: ShapeKind;
}

/// Returns the shape `T` is classified as.
#[must_use]
pub const fn shape_of<T: Classify + ?Sized>() -> Shape {
    <T::Shape as ShapeKind>::SHAPE
}

/// An ordered container that is rebuilt by appending at the end.
pub trait Sequential: Default {
    /// The type of the elements.
    type Element;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Iterates the elements in order.
    fn elements(&self) -> impl Iterator<Item = &Self::Element>;

    /// Removes every element.
    fn clear(&mut self);

    /// Appends an element at the end.
    fn push_back(&mut self, element: Self::Element);

    /// Reserves room for at least `additional` more elements.
    fn reserve(&mut self, _additional: usize) {}
}

/// An associative container whose elements are their own keys.
pub trait SetLike: Default {
    /// The type of the elements.
    type Element;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Iterates the elements in the container's natural order.
    fn elements(&self) -> impl Iterator<Item = &Self::Element>;

    /// Removes every element.
    fn clear(&mut self);

    /// Inserts an element, returning `false` if the container already held an
    /// equal one.
    fn insert(&mut self, element: Self::Element) -> bool;

    /// Reserves room for at least `additional` more elements.
    fn reserve(&mut self, _additional: usize) {}
}

/// An associative container of key/value entries.
pub trait MapLike: Default {
    /// The type of the keys.
    type Key;

    /// The type of the mapped values.
    type Value;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no entries.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Iterates the entries in the container's natural order.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Inserts an entry, replacing the value of an equal key.
    fn insert(&mut self, key: Self::Key, value: Self::Value);

    /// Reserves room for at least `additional` more entries.
    fn reserve(&mut self, _additional: usize) {}
}

// =============================================================================
// Standard Library Containers
// =============================================================================

impl Classify for String {
    type Shape = Text;
}

impl Classify for str {
    type Shape = Text;
}

impl<T> Sequential for Vec<T> {
    type Element = T;

    fn len(&self) -> usize { Self::len(self) }

    fn elements(&self) -> impl Iterator<Item = &T> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn push_back(&mut self, element: T) { self.push(element) }

    fn reserve(&mut self, additional: usize) { Self::reserve(self, additional) }
}

impl<T> Sequential for VecDeque<T> {
    type Element = T;

    fn len(&self) -> usize { Self::len(self) }

    fn elements(&self) -> impl Iterator<Item = &T> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn push_back(&mut self, element: T) { Self::push_back(self, element) }

    fn reserve(&mut self, additional: usize) { Self::reserve(self, additional) }
}

impl<T> Sequential for LinkedList<T> {
    type Element = T;

    fn len(&self) -> usize { Self::len(self) }

    fn elements(&self) -> impl Iterator<Item = &T> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn push_back(&mut self, element: T) { Self::push_back(self, element) }
}

impl<T: Eq + Hash, S: BuildHasher + Default> SetLike for HashSet<T, S> {
    type Element = T;

    fn len(&self) -> usize { Self::len(self) }

    fn elements(&self) -> impl Iterator<Item = &T> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn insert(&mut self, element: T) -> bool { Self::insert(self, element) }

    fn reserve(&mut self, additional: usize) { Self::reserve(self, additional) }
}

impl<T: Ord> SetLike for BTreeSet<T> {
    type Element = T;

    fn len(&self) -> usize { Self::len(self) }

    fn elements(&self) -> impl Iterator<Item = &T> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn insert(&mut self, element: T) -> bool { Self::insert(self, element) }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> MapLike for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize { Self::len(self) }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn insert(&mut self, key: K, value: V) { Self::insert(self, key, value); }

    fn reserve(&mut self, additional: usize) { Self::reserve(self, additional) }
}

impl<K: Ord, V> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize { Self::len(self) }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> { self.iter() }

    fn clear(&mut self) { Self::clear(self) }

    fn insert(&mut self, key: K, value: V) { Self::insert(self, key, value); }
}

impl<T> Classify for Vec<T> {
    type Shape = Sequence;
}

impl<T> Classify for VecDeque<T> {
    type Shape = Sequence;
}

impl<T> Classify for LinkedList<T> {
    type Shape = Sequence;
}

impl<T, S> Classify for HashSet<T, S> {
    type Shape = Set;
}

impl<T> Classify for BTreeSet<T> {
    type Shape = Set;
}

impl<K, V, S> Classify for HashMap<K, V, S> {
    type Shape = Map;
}

impl<K, V> Classify for BTreeMap<K, V> {
    type Shape = Map;
}

#[cfg(test)]
mod test;
