//! Decoding limits.
//!
//! The count prefixes of the wire format are trusted by nothing else in the
//! crate: every one of them is checked against a [`Config`] before a string or
//! container is grown for it.

// covers the builder generated by `TypedBuilder`
#![allow(missing_debug_implementations)]

use typed_builder::TypedBuilder;

/// The default value of [`Config::max_length`].
pub const DEFAULT_MAX_LENGTH: u32 = 1 << 26;

/// The default value of [`Config::max_preallocation`].
pub const DEFAULT_PREALLOCATION: usize = 4096;

/// The default value of [`Config::max_preallocation_bytes`].
pub const DEFAULT_PREALLOCATION_BYTES: usize = 1 << 20;

/// Limits applied by a [`crate::Deserializer`] to the counts it decodes.
///
/// # Examples
///
/// ```rust
/// use typecodec::Config;
///
/// let config = Config::builder().max_length(1024).byte_limit(64).build();
///
/// assert_eq!(config.max_length(), 1024);
/// assert_eq!(config.byte_limit(), Some(64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Config {
    /// The largest count accepted for a single string or container.
    #[builder(default = DEFAULT_MAX_LENGTH)]
    max_length: u32,

    /// The total number of bytes the deserializer may read from its source.
    #[builder(default, setter(strip_option))]
    byte_limit: Option<u64>,

    /// The largest number of elements reserved up front for a container.
    /// Anything beyond grows as elements actually arrive.
    #[builder(default = DEFAULT_PREALLOCATION)]
    max_preallocation: usize,

    /// The largest number of bytes reserved up front for a container,
    /// whatever the size of its elements.
    #[builder(default = DEFAULT_PREALLOCATION_BYTES)]
    max_preallocation_bytes: usize,
}

impl Config {
    /// Returns the largest count accepted for a single string or container.
    #[must_use]
    pub const fn max_length(&self) -> u32 { self.max_length }

    /// Returns the total number of bytes the deserializer may read, if
    /// bounded.
    #[must_use]
    pub const fn byte_limit(&self) -> Option<u64> { self.byte_limit }

    /// Returns the largest number of elements reserved up front for a
    /// container.
    #[must_use]
    pub const fn max_preallocation(&self) -> usize { self.max_preallocation }

    /// Returns the largest number of bytes reserved up front for a container.
    #[must_use]
    pub const fn max_preallocation_bytes(&self) -> usize {
        self.max_preallocation_bytes
    }
}

impl Default for Config {
    fn default() -> Self { Self::builder().build() }
}
