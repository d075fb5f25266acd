//! Cache keys for floating-point inputs.
//!
//! `f32` and `f64` are not `Eq + Hash`, so they cannot be part of a cache key
//! directly. [`F32Key`] and [`F64Key`] compare and hash by raw bit pattern:
//!
//! - `NaN` equals `NaN` when both have the same bit pattern
//! - `0.0` and `-0.0` are different keys
//!
//! Two inputs share a cache entry only when they are bit-for-bit identical,
//! so a memoized computation never returns an output computed for a
//! different bit pattern.
//!
//! # Examples
//!
//! ```rust
//! use throwable::memoize::F64Key;
//!
//! assert_eq!(F64Key::new(f64::NAN), F64Key::new(f64::NAN));
//! assert_ne!(F64Key::new(0.0), F64Key::new(-0.0));
//! assert_eq!(F64Key::new(1.5).get(), 1.5);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! float_key {
    ($(#[$meta:meta])* $name:ident, $float:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default)]
        pub struct $name($float);

        impl $name {
            /// Wraps `value`.
            #[inline]
            pub const fn new(value: $float) -> Self {
                Self(value)
            }

            /// Returns the wrapped value.
            #[inline]
            pub const fn get(self) -> $float {
                self.0
            }
        }

        impl PartialEq for $name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state);
            }
        }

        impl From<$float> for $name {
            #[inline]
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $float {
            #[inline]
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, formatter)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, formatter)
            }
        }
    };
}

float_key!(
    /// An `f32` compared and hashed by bit pattern.
    F32Key,
    f32
);

float_key!(
    /// An `f64` compared and hashed by bit pattern.
    F64Key,
    f64
);
