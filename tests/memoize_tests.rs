#![cfg(feature = "memoize")]
//! Integration tests for memoized computations.

use rstest::rstest;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use throwable::bridge::Failure;
use throwable::computation::{BoxedComputation, Computation, ComputationExt, Outcome, constant};
use throwable::memoize::{CacheConfig, F32Key, Memoized, memoize};

// =============================================================================
// Fixtures
// =============================================================================

fn counting_add(calls: &Arc<AtomicUsize>) -> impl Fn(i64, i64) -> Outcome<i64, io::Error> + use<> {
    let calls = Arc::clone(calls);
    move |a, b| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(a + b)
    }
}

// =============================================================================
// At-most-once evaluation
// =============================================================================

#[rstest]
#[case(1, 2)]
#[case(-5, 5)]
#[case(i64::MAX, 0)]
fn memoized_runs_underlying_computation_once(#[case] a: i64, #[case] b: i64) {
    let calls = Arc::new(AtomicUsize::new(0));
    let memoized = memoize(counting_add(&calls));

    let first = memoized.apply((a, b)).ok();
    let second = memoized.apply((a, b)).ok();

    assert_eq!(first, second);
    assert_eq!(first, Some(a + b));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn distinct_keys_are_computed_separately() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memoized = counting_add(&calls).memoized();

    for a in 0..10 {
        for b in 0..10 {
            assert_eq!(memoized.apply((a, b)).ok(), Some(a + b));
        }
    }
    for a in 0..10 {
        for b in 0..10 {
            assert_eq!(memoized.apply((a, b)).ok(), Some(a + b));
        }
    }

    assert_eq!(calls.load(Ordering::SeqCst), 100);
    assert_eq!(memoized.len(), 100);
}

#[rstest]
fn swapped_inputs_are_different_keys() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memoized = counting_add(&calls).memoized();

    let _ = memoized.apply((1, 2));
    let _ = memoized.apply((2, 1));
    let _ = memoized.apply((3, 3));
    let _ = memoized.apply((3, 3));

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(memoized.is_cached(&(1, 2)));
    assert!(memoized.is_cached(&(2, 1)));
}

#[rstest]
fn owned_string_inputs_are_keys() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let greet = move |name: String| -> Outcome<String, io::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hello, {name}"))
    };
    let memoized = greet.memoized();

    assert_eq!(memoized.apply(("ada".to_owned(),)).ok().as_deref(), Some("hello, ada"));
    assert_eq!(memoized.apply(("ada".to_owned(),)).ok().as_deref(), Some("hello, ada"));
    assert_eq!(memoized.cached(&("ada".to_owned(),)).as_deref(), Some("hello, ada"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Failures are not cached
// =============================================================================

#[rstest]
fn failure_does_not_poison_the_key() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let flaky = move |value: u32| -> Outcome<u32, io::Error> {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(io::Error::other("transient").into())
        } else {
            Ok(value * 10)
        }
    };
    let memoized = flaky.memoized();

    let failure = memoized.apply((4,)).unwrap_err();
    assert_eq!(failure.to_string(), "transient");
    assert!(memoized.is_empty());

    assert_eq!(memoized.apply((4,)).ok(), Some(40));
    assert_eq!(memoized.apply((4,)).ok(), Some(40));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[rstest]
fn failure_is_returned_unchanged() {
    let always = |_: u8| -> Outcome<u8, String> { Err(Failure::checked("denied".to_owned())) };
    let memoized = always.memoized();

    for _ in 0..3 {
        let failure = memoized.apply((1,)).unwrap_err();
        assert_eq!(failure.into_checked().as_deref(), Some("denied"));
    }
    assert!(!memoized.is_cached(&(1,)));
}

// =============================================================================
// Idempotent wrapping
// =============================================================================

#[rstest]
fn memoizing_a_memoized_computation_returns_it() {
    let calls = Arc::new(AtomicUsize::new(0));
    let once = counting_add(&calls).memoized();
    let _ = once.apply((1, 1));

    let twice = once.memoized();
    assert!(twice.is_memoized());
    assert!(twice.is_cached(&(1, 1)));
    let _ = twice.apply((1, 1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn explicitly_double_wrapped_still_runs_once_per_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let inner = memoize(counting_add(&calls));
    let outer = memoize(inner);

    for _ in 0..5 {
        assert_eq!(outer.apply((2, 3)).ok(), Some(5));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(outer.inner().is_memoized());
}

fn cache_unless_memoized<C>(computation: C) -> BoxedComputation<'static, (i64, i64), i64, io::Error>
where
    C: Computation<(i64, i64), Output = i64, Error = io::Error> + Send + Sync + 'static,
{
    if computation.is_memoized() {
        computation.boxed()
    } else {
        computation.memoized().boxed()
    }
}

fn cache_in_generic_code<C>(computation: C) -> Memoized<C, (i64, i64)>
where
    C: Computation<(i64, i64), Output = i64, Error = io::Error>,
{
    computation.memoized()
}

#[rstest]
fn generic_memoized_wraps_again_but_still_runs_once_per_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let twice = cache_in_generic_code(counting_add(&calls).memoized());

    assert!(twice.inner().is_memoized());
    for _ in 0..3 {
        assert_eq!(twice.apply((4, 5)).ok(), Some(9));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(twice.is_cached(&(4, 5)));
    assert!(twice.inner().is_cached(&(4, 5)));
}

#[rstest]
fn checking_is_memoized_avoids_a_second_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let once = counting_add(&calls).memoized();
    let cached = cache_unless_memoized(once);

    assert!(cached.is_memoized());
    assert_eq!(cached.apply((1, 2)).ok(), Some(3));
    assert_eq!(cached.apply((1, 2)).ok(), Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let plain = cache_unless_memoized(counting_add(&calls));
    assert!(plain.is_memoized());
}

#[rstest]
fn unwrapped_computation_reports_not_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let plain = counting_add(&calls);
    assert!(!plain.is_memoized());
    assert!(plain.nest().memoized().is_memoized());
}

// =============================================================================
// Interaction with the bridge
// =============================================================================

#[rstest]
fn recovered_then_memoized_caches_substitute_output() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let read = move |_: i32, _: i32| -> Outcome<i32, io::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("boom").into())
    };
    let memoized = read.recover(|_: &io::Error| Some(constant(-1))).memoized();

    assert_eq!(memoized.apply((3, 4)).ok(), Some(-1));
    assert_eq!(memoized.apply((3, 4)).ok(), Some(-1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn memoized_then_nested_keeps_retrying_failures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let read = move |_: i32| -> Outcome<i32, io::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("boom").into())
    };
    let nested = read.memoized().nest();

    for _ in 0..3 {
        let failure = nested.apply((1,)).unwrap_err().into_unchecked();
        assert_eq!(failure.as_nested().expect("nested").message(), "boom");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(nested.is_memoized());
}

// =============================================================================
// Configuration
// =============================================================================

#[rstest]
fn configured_cache_behaves_like_default() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memoized = Memoized::try_with_config(
        counting_add(&calls),
        CacheConfig::new().with_capacity(16).with_shard_amount(8),
    )
    .expect("valid config");

    let _ = memoized.apply((1, 2));
    let _ = memoized.apply((1, 2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn custom_hasher_is_accepted() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memoized = Memoized::with_hasher(
        counting_add(&calls),
        std::collections::hash_map::RandomState::new(),
    );

    assert_eq!(memoized.apply((20, 22)).ok(), Some(42));
    assert_eq!(memoized.apply((20, 22)).ok(), Some(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn float_keys_follow_bit_pattern_equality() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let scale = move |value: F32Key, factor: u8| -> Outcome<f32, io::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value.get() * f32::from(factor))
    };
    let memoized = scale.memoized();

    let _ = memoized.apply((F32Key::new(f32::NAN), 2));
    let _ = memoized.apply((F32Key::new(f32::NAN), 2));
    let _ = memoized.apply((F32Key::new(0.0), 2));
    let _ = memoized.apply((F32Key::new(-0.0), 2));
    let _ = memoized.apply((F32Key::new(-0.0), 2));

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
