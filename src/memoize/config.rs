//! Cache construction settings.

use std::error::Error;
use std::fmt;

/// The hasher used by [`Memoized::new`](super::Memoized::new).
///
/// Chosen by cargo feature: `fxhash` selects `rustc_hash::FxBuildHasher`,
/// `ahash` selects `ahash::RandomState`, otherwise the standard library's
/// `RandomState`.
#[cfg(feature = "fxhash")]
pub type DefaultCacheHasher = rustc_hash::FxBuildHasher;

/// The hasher used by [`Memoized::new`](super::Memoized::new).
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultCacheHasher = ahash::RandomState;

/// The hasher used by [`Memoized::new`](super::Memoized::new).
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultCacheHasher = std::collections::hash_map::RandomState;

/// Errors raised when a [`CacheConfig`] cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheConfigError {
    /// The shard amount must be a power of two greater than one.
    InvalidShardAmount(usize),
}

impl fmt::Display for CacheConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShardAmount(amount) => write!(
                formatter,
                "shard amount must be a power of two greater than 1, got {amount}"
            ),
        }
    }
}

impl Error for CacheConfigError {}

/// Sizing of a memoization cache.
///
/// # Examples
///
/// ```rust
/// use throwable::memoize::{CacheConfig, CacheConfigError};
///
/// let config = CacheConfig::new().with_capacity(1024).with_shard_amount(16);
/// assert_eq!(config.validate(), Ok(()));
///
/// let invalid = CacheConfig::new().with_shard_amount(3);
/// assert_eq!(invalid.validate(), Err(CacheConfigError::InvalidShardAmount(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheConfig {
    capacity: usize,
    shard_amount: Option<usize>,
}

impl CacheConfig {
    /// An empty cache with the map's default shard amount.
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            shard_amount: None,
        }
    }

    /// Pre-allocates room for `capacity` entries.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of independently locked shards.
    #[must_use]
    pub const fn with_shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = Some(shard_amount);
        self
    }

    /// The initial capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configured shard amount, if any.
    pub const fn shard_amount(&self) -> Option<usize> {
        self.shard_amount
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`CacheConfigError::InvalidShardAmount`] when the shard amount
    /// is not a power of two greater than one.
    pub const fn validate(&self) -> Result<(), CacheConfigError> {
        match self.shard_amount {
            Some(amount) if amount < 2 || !amount.is_power_of_two() => {
                Err(CacheConfigError::InvalidShardAmount(amount))
            }
            _ => Ok(()),
        }
    }
}
