//! Thread-safe memoization of computations.
//!
//! [`Memoized`] wraps a computation with a concurrent cache keyed by the whole
//! input tuple. Tuples compare structurally and hash every element in order,
//! so `(a, b)` and `(b, a)` are different keys unless `a == b`.
//!
//! # Caching Rules
//!
//! - A cache hit returns a clone of the stored output without running the
//!   computation.
//! - Only successes are stored. A failure is returned unchanged and leaves the
//!   key absent, so the next call for that key runs the computation again.
//! - The first success stored for a key wins. Concurrent callers that raced
//!   on the same key and finish later discard their own output and return
//!   the stored one, so every caller observes the same value.
//! - Entries are never replaced, evicted or cleared. The cache lives exactly
//!   as long as the `Memoized` value.
//!
//! # Concurrency
//!
//! The cache is a [`DashMap`], so calls for different keys only contend on
//! shard locks. No lock is held while the computation runs, which means a
//! computation may recursively call its own memoized wrapper. Racing first
//! callers for one key may each run the computation; the insert that commits
//! the result is an atomic insert-if-absent.
//!
//! # Examples
//!
//! ```rust
//! use throwable::computation::{Computation, ComputationExt, Outcome};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::thread;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let add = move |a: u32, b: u32| -> Outcome<u32, String> {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     Ok(a + b)
//! };
//! let memoized = Arc::new(add.memoized());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let memoized = Arc::clone(&memoized);
//!         thread::spawn(move || memoized.apply((1, 2)).ok())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), Some(3));
//! }
//! assert!(calls.load(Ordering::SeqCst) >= 1);
//! ```

mod config;
mod key;

pub use config::{CacheConfig, CacheConfigError, DefaultCacheHasher};
pub use key::{F32Key, F64Key};

use std::fmt;
use std::hash::{BuildHasher, Hash};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::computation::{Computation, Outcome};

/// A computation whose successful outputs are cached per input tuple.
///
/// Created by [`memoize`] or
/// [`ComputationExt::memoized`](crate::computation::ComputationExt::memoized).
///
/// # Type Parameters
///
/// * `C` - The wrapped computation
/// * `Args` - The input tuple, used as the cache key
/// * `S` - The hasher of the cache
///
/// # Thread Safety
///
/// `Memoized` is `Send + Sync` when `C`, `Args` and the output are. Share it
/// with `Arc` to call it from several threads.
pub struct Memoized<C, Args, S = DefaultCacheHasher>
where
    C: Computation<Args>,
{
    computation: C,
    cache: DashMap<Args, C::Output, S>,
}

/// Wraps `computation` in a fresh, empty cache.
///
/// To avoid wrapping twice, call
/// [`memoized`](crate::computation::ComputationExt::memoized) on the value
/// instead: on a `Memoized` it returns the value unchanged.
pub fn memoize<C, Args>(computation: C) -> Memoized<C, Args>
where
    C: Computation<Args>,
    Args: Eq + Hash + Clone,
    C::Output: Clone,
{
    Memoized::new(computation)
}

impl<C, Args> Memoized<C, Args, DefaultCacheHasher>
where
    C: Computation<Args>,
    Args: Eq + Hash + Clone,
    C::Output: Clone,
{
    /// Wraps `computation` in an empty cache using the default hasher.
    pub fn new(computation: C) -> Self {
        Self::with_hasher(computation, DefaultCacheHasher::default())
    }

    /// Wraps `computation` in a cache sized by `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid. Use [`Memoized::try_with_config`] to
    /// get an error instead.
    pub fn with_config(computation: C, config: CacheConfig) -> Self {
        match Self::try_with_config(computation, config) {
            Ok(memoized) => memoized,
            Err(error) => panic!("invalid cache config: {error}"),
        }
    }

    /// Wraps `computation` in a cache sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheConfigError`] if `config` is invalid.
    pub fn try_with_config(computation: C, config: CacheConfig) -> Result<Self, CacheConfigError> {
        Self::try_with_config_and_hasher(computation, config, DefaultCacheHasher::default())
    }
}

impl<C, Args, S> Memoized<C, Args, S>
where
    C: Computation<Args>,
    Args: Eq + Hash + Clone,
    C::Output: Clone,
    S: BuildHasher + Clone,
{
    /// Wraps `computation` in an empty cache using `hasher`.
    pub fn with_hasher(computation: C, hasher: S) -> Self {
        Self {
            computation,
            cache: DashMap::with_hasher(hasher),
        }
    }

    /// Wraps `computation` in a cache sized by `config` and using `hasher`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheConfigError`] if `config` is invalid.
    pub fn try_with_config_and_hasher(
        computation: C,
        config: CacheConfig,
        hasher: S,
    ) -> Result<Self, CacheConfigError> {
        config.validate()?;
        let cache = match config.shard_amount() {
            Some(shard_amount) => DashMap::with_capacity_and_hasher_and_shard_amount(
                config.capacity(),
                hasher,
                shard_amount,
            ),
            None => DashMap::with_capacity_and_hasher(config.capacity(), hasher),
        };
        Ok(Self { computation, cache })
    }

    /// Returns `self`: the value is already memoized.
    ///
    /// Shadows [`ComputationExt::memoized`](crate::computation::ComputationExt::memoized)
    /// so that memoizing twice never adds a second cache.
    #[must_use]
    pub fn memoized(self) -> Self {
        self
    }

    /// Returns `true` if an output is stored for `args`.
    pub fn is_cached(&self, args: &Args) -> bool {
        self.cache.contains_key(args)
    }

    /// Returns a clone of the output stored for `args`, without computing.
    pub fn cached(&self, args: &Args) -> Option<C::Output> {
        self.cache.get(args).map(|entry| entry.value().clone())
    }
}

impl<C, Args, S> Memoized<C, Args, S>
where
    C: Computation<Args>,
    Args: Eq + Hash,
    S: BuildHasher + Clone,
{
    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<C, Args, S> Memoized<C, Args, S>
where
    C: Computation<Args>,
{
    /// Returns a reference to the wrapped computation.
    pub const fn inner(&self) -> &C {
        &self.computation
    }

    /// Drops the cache and returns the wrapped computation.
    pub fn into_inner(self) -> C {
        self.computation
    }
}

impl<C, Args, S> Computation<Args> for Memoized<C, Args, S>
where
    C: Computation<Args>,
    Args: Eq + Hash + Clone,
    C::Output: Clone,
    S: BuildHasher + Clone,
{
    type Output = C::Output;
    type Error = C::Error;

    fn apply(&self, args: Args) -> Outcome<C::Output, C::Error> {
        // The read guard must be gone before the computation runs.
        if let Some(output) = self.cached(&args) {
            tracing::trace!("memoized cache hit");
            return Ok(output);
        }

        tracing::trace!("memoized cache miss");
        let output = self.computation.apply(args.clone())?;

        match self.cache.entry(args) {
            Entry::Occupied(occupied) => {
                tracing::trace!("discarding output of a racing computation");
                Ok(occupied.get().clone())
            }
            Entry::Vacant(vacant) => {
                tracing::trace!("committing computed output");
                Ok(vacant.insert(output).value().clone())
            }
        }
    }

    fn is_memoized(&self) -> bool {
        true
    }
}

impl<C, Args, S> fmt::Debug for Memoized<C, Args, S>
where
    C: Computation<Args> + fmt::Debug,
    Args: Eq + Hash,
    S: BuildHasher + Clone,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("computation", &self.computation)
            .field("cached_entries", &self.cache.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(
    Memoized<fn(u64) -> Outcome<u64, String>, (u64,)>: Send, Sync
);
