//! Failure types produced and propagated by computations.
//!
//! A computation fails with a [`Failure<E>`], which is one of two categories:
//!
//! - [`Failure::Checked`]: an expected, typed cause `E` that the computation
//!   declares through its `Error` type.
//! - [`Failure::Unchecked`]: an [`UncheckedFailure`] that no wrapper in this
//!   crate ever intercepts. It is passed through every bridge unchanged.
//!
//! Panics form the fatal category. Nothing in this crate catches them, so a
//! panic raised by a computation reaches the caller with its original payload.
//!
//! # Examples
//!
//! ```rust
//! use throwable::bridge::{Failure, UncheckedFailure};
//! use std::io;
//!
//! let failure: Failure<io::Error> = Failure::checked(io::Error::other("boom"));
//! assert!(failure.is_checked());
//!
//! let unchecked = failure.escalate(UncheckedFailure::nest);
//! assert_eq!(unchecked.to_string(), "boom");
//! ```

use std::any::type_name;
use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased error used as the cause of unchecked failures.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

// =============================================================================
// Failure
// =============================================================================

/// The failure side of a computation's [`Outcome`](crate::computation::Outcome).
///
/// `Failure<Infallible>` can only hold the unchecked category; this is the
/// error type of every computation that declares no checked failure.
#[derive(Debug, Clone)]
pub enum Failure<E> {
    /// An expected, typed failure the computation declares.
    Checked(E),
    /// A failure the bridge never intercepts.
    Unchecked(UncheckedFailure),
}

impl<E> Failure<E> {
    /// Creates a checked-domain failure.
    #[inline]
    pub const fn checked(cause: E) -> Self {
        Self::Checked(cause)
    }

    /// Creates an unchecked failure from any error value.
    ///
    /// The error is placed behind an `Arc`, so clones of the returned failure
    /// share one cause and compare equal under [`UncheckedFailure::ptr_eq`].
    pub fn runtime<R>(error: R) -> Self
    where
        R: Error + Send + Sync + 'static,
    {
        Self::Unchecked(UncheckedFailure::Runtime(RuntimeFailure::new(error)))
    }

    /// Returns `true` for the checked-domain category.
    #[inline]
    pub const fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(_))
    }

    /// Returns `true` for the unchecked category.
    #[inline]
    pub const fn is_unchecked(&self) -> bool {
        matches!(self, Self::Unchecked(_))
    }

    /// Returns the checked cause, discarding an unchecked failure.
    pub fn into_checked(self) -> Option<E> {
        match self {
            Self::Checked(cause) => Some(cause),
            Self::Unchecked(_) => None,
        }
    }

    /// Returns a reference to the checked cause, if any.
    pub const fn checked_ref(&self) -> Option<&E> {
        match self {
            Self::Checked(cause) => Some(cause),
            Self::Unchecked(_) => None,
        }
    }

    /// Returns the unchecked failure, if any.
    pub const fn unchecked_ref(&self) -> Option<&UncheckedFailure> {
        match self {
            Self::Checked(_) => None,
            Self::Unchecked(failure) => Some(failure),
        }
    }

    /// Transforms the checked cause, leaving an unchecked failure untouched.
    pub fn map_checked<E2, F>(self, transform: F) -> Failure<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Checked(cause) => Failure::Checked(transform(cause)),
            Self::Unchecked(failure) => Failure::Unchecked(failure),
        }
    }

    /// Converts the checked cause into an unchecked failure using `mapper`.
    ///
    /// An unchecked failure is returned as-is.
    pub fn escalate<F>(self, mapper: F) -> UncheckedFailure
    where
        F: FnOnce(E) -> UncheckedFailure,
    {
        match self {
            Self::Checked(cause) => mapper(cause),
            Self::Unchecked(failure) => failure,
        }
    }

    /// Re-types a failure that carries no checked cause.
    ///
    /// Returns the checked cause back in `Err` when there is one.
    pub fn widen<E2>(self) -> Result<Failure<E2>, E> {
        match self {
            Self::Checked(cause) => Err(cause),
            Self::Unchecked(failure) => Ok(Failure::Unchecked(failure)),
        }
    }
}

impl Failure<Infallible> {
    /// Extracts the unchecked failure; the checked category is uninhabited.
    pub fn into_unchecked(self) -> UncheckedFailure {
        match self {
            Self::Checked(never) => match never {},
            Self::Unchecked(failure) => failure,
        }
    }

    /// Re-types an infallible failure into any checked error type.
    pub fn cast<E>(self) -> Failure<E> {
        Failure::Unchecked(self.into_unchecked())
    }
}

impl<E> From<E> for Failure<E> {
    #[inline]
    fn from(cause: E) -> Self {
        Self::Checked(cause)
    }
}

impl<E: fmt::Display> fmt::Display for Failure<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checked(cause) => fmt::Display::fmt(cause, formatter),
            Self::Unchecked(failure) => fmt::Display::fmt(failure, formatter),
        }
    }
}

impl<E> Error for Failure<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Checked(cause) => cause.source(),
            Self::Unchecked(failure) => failure.source(),
        }
    }
}

// =============================================================================
// UncheckedFailure
// =============================================================================

/// The unchecked failure category.
///
/// Every variant is cheap to clone and clones share the same underlying
/// cause, so identity survives propagation through any number of wrappers.
#[derive(Debug, Clone)]
pub enum UncheckedFailure {
    /// A checked cause wrapped by [`nest`](crate::computation::ComputationExt::nest).
    Nested(NestedFailure),
    /// A recovery function returned no substitute computation.
    ContractViolation(ContractViolation),
    /// Any other unchecked error raised by a computation.
    Runtime(RuntimeFailure),
}

impl UncheckedFailure {
    /// The default `nest` mapper: wraps `cause` into a [`NestedFailure`].
    pub fn nest<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Nested(NestedFailure::new(cause))
    }

    /// Returns `true` when both values are clones of the same failure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nested(left), Self::Nested(right)) => left.ptr_eq(right),
            (Self::Runtime(left), Self::Runtime(right)) => left.ptr_eq(right),
            (Self::ContractViolation(left), Self::ContractViolation(right)) => {
                Arc::ptr_eq(&left.inner, &right.inner)
            }
            _ => false,
        }
    }

    /// Returns the nested failure, if this is one.
    pub const fn as_nested(&self) -> Option<&NestedFailure> {
        match self {
            Self::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    /// Returns the contract violation, if this is one.
    pub const fn as_contract_violation(&self) -> Option<&ContractViolation> {
        match self {
            Self::ContractViolation(violation) => Some(violation),
            _ => None,
        }
    }

    /// Returns the runtime failure, if this is one.
    pub const fn as_runtime(&self) -> Option<&RuntimeFailure> {
        match self {
            Self::Runtime(runtime) => Some(runtime),
            _ => None,
        }
    }
}

impl fmt::Display for UncheckedFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested(nested) => fmt::Display::fmt(nested, formatter),
            Self::ContractViolation(violation) => fmt::Display::fmt(violation, formatter),
            Self::Runtime(runtime) => fmt::Display::fmt(runtime, formatter),
        }
    }
}

impl Error for UncheckedFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Nested(nested) => Some(nested.cause()),
            Self::ContractViolation(_) => None,
            Self::Runtime(runtime) => runtime.source(),
        }
    }
}

impl From<NestedFailure> for UncheckedFailure {
    fn from(nested: NestedFailure) -> Self {
        Self::Nested(nested)
    }
}

impl From<ContractViolation> for UncheckedFailure {
    fn from(violation: ContractViolation) -> Self {
        Self::ContractViolation(violation)
    }
}

impl From<RuntimeFailure> for UncheckedFailure {
    fn from(runtime: RuntimeFailure) -> Self {
        Self::Runtime(runtime)
    }
}

// =============================================================================
// NestedFailure
// =============================================================================

/// An unchecked failure carrying a checked cause.
///
/// The message is the cause's `Display` text, and [`Error::source`] returns
/// the cause. Nesting a value that already is a `NestedFailure` returns it
/// unchanged instead of wrapping it a second time.
///
/// Only the bridge builds these; outside this crate use
/// [`UncheckedFailure::nest`] or [`nest`](crate::computation::ComputationExt::nest).
///
/// # Examples
///
/// ```rust
/// use throwable::bridge::UncheckedFailure;
/// use std::io;
///
/// let unchecked = UncheckedFailure::nest(io::Error::other("boom"));
/// let nested = unchecked.as_nested().expect("nested");
/// assert_eq!(nested.message(), "boom");
/// assert!(nested.downcast_cause::<io::Error>().is_some());
///
/// let again = UncheckedFailure::nest(nested.clone());
/// assert!(again.ptr_eq(&unchecked));
/// ```
#[derive(Debug, Clone)]
pub struct NestedFailure {
    message: String,
    cause: SharedError,
}

impl NestedFailure {
    /// Wraps `cause`, taking its `Display` text as the message.
    pub(crate) fn new<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let cause: SharedError = Arc::new(cause);
        if let Some(nested) = cause.downcast_ref::<Self>() {
            return nested.clone();
        }
        Self {
            message: cause.to_string(),
            cause,
        }
    }

    /// The message derived from the cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// The wrapped cause as a shared handle.
    pub fn shared_cause(&self) -> &SharedError {
        &self.cause
    }

    /// Returns the cause as `T` if that is its concrete type.
    pub fn downcast_cause<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        self.cause.downcast_ref::<T>()
    }

    /// Returns `true` when both wrap the same cause allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cause, &other.cause)
    }
}

impl fmt::Display for NestedFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for NestedFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

// =============================================================================
// ContractViolation
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
struct ViolationDetail {
    cause_type: &'static str,
    cause_message: String,
}

/// Raised when a recovery function returns no substitute computation.
///
/// Identifies the type and message of the checked cause that was being
/// recovered.
#[derive(Debug, Clone)]
pub struct ContractViolation {
    inner: Arc<ViolationDetail>,
}

impl ContractViolation {
    /// Describes a missing substitute for `cause`.
    pub fn missing_substitute<E: fmt::Display>(cause: &E) -> Self {
        Self {
            inner: Arc::new(ViolationDetail {
                cause_type: type_name::<E>(),
                cause_message: cause.to_string(),
            }),
        }
    }

    /// The type name of the cause being recovered.
    pub fn cause_type(&self) -> &'static str {
        self.inner.cause_type
    }

    /// The message of the cause being recovered.
    pub fn cause_message(&self) -> &str {
        &self.inner.cause_message
    }
}

impl PartialEq for ContractViolation {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for ContractViolation {}

impl fmt::Display for ContractViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "recovery function returned no substitute for {}: {}",
            self.inner.cause_type, self.inner.cause_message
        )
    }
}

impl Error for ContractViolation {}

// =============================================================================
// RuntimeFailure
// =============================================================================

/// A pre-existing unchecked error, shared so its identity can be observed.
#[derive(Debug, Clone)]
pub struct RuntimeFailure {
    error: SharedError,
}

impl RuntimeFailure {
    /// Wraps `error`.
    pub fn new<R>(error: R) -> Self
    where
        R: Error + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
        }
    }

    /// Wraps an already shared error.
    pub const fn from_shared(error: SharedError) -> Self {
        Self { error }
    }

    /// The wrapped error.
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Returns the error as `T` if that is its concrete type.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        self.error.downcast_ref::<T>()
    }

    /// Returns `true` when both share the same error allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}

impl fmt::Display for RuntimeFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, formatter)
    }
}

impl Error for RuntimeFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.source()
    }
}

static_assertions::assert_impl_all!(UncheckedFailure: Send, Sync, Clone);
static_assertions::assert_impl_all!(Failure<std::io::Error>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;

    #[derive(Debug, PartialEq, Eq)]
    struct Boom(&'static str);

    impl fmt::Display for Boom {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "boom: {}", self.0)
        }
    }

    impl Error for Boom {}

    #[rstest]
    fn test_nested_failure_message_comes_from_cause() {
        let nested = NestedFailure::new(Boom("disk"));
        assert_eq!(nested.message(), "boom: disk");
        assert_eq!(nested.to_string(), "boom: disk");
        assert_eq!(nested.downcast_cause::<Boom>(), Some(&Boom("disk")));
    }

    #[rstest]
    fn test_nested_failure_source_is_cause() {
        let nested = NestedFailure::new(io::Error::other("boom"));
        let source = nested.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
    }

    #[rstest]
    fn test_nested_failure_is_never_double_wrapped() {
        let nested = NestedFailure::new(Boom("once"));
        let rewrapped = NestedFailure::new(nested.clone());

        assert!(rewrapped.ptr_eq(&nested));
        assert!(rewrapped.downcast_cause::<NestedFailure>().is_none());
        assert_eq!(rewrapped.downcast_cause::<Boom>(), Some(&Boom("once")));
    }

    #[rstest]
    fn test_contract_violation_names_cause_type_and_message() {
        let violation = ContractViolation::missing_substitute(&Boom("gone"));
        assert!(violation.cause_type().ends_with("Boom"));
        assert_eq!(violation.cause_message(), "boom: gone");
        assert!(violation.to_string().contains("boom: gone"));
    }

    #[rstest]
    fn test_unchecked_clone_preserves_identity() {
        let failure = UncheckedFailure::Runtime(RuntimeFailure::new(Boom("x")));
        let clone = failure.clone();
        let other = UncheckedFailure::Runtime(RuntimeFailure::new(Boom("x")));

        assert!(failure.ptr_eq(&clone));
        assert!(!failure.ptr_eq(&other));
    }

    #[rstest]
    #[case(Failure::checked(Boom("c")), true)]
    #[case(Failure::runtime(Boom("u")), false)]
    fn test_failure_category(#[case] failure: Failure<Boom>, #[case] checked: bool) {
        assert_eq!(failure.is_checked(), checked);
        assert_eq!(failure.is_unchecked(), !checked);
    }

    #[rstest]
    fn test_escalate_leaves_unchecked_untouched() {
        let original = UncheckedFailure::Runtime(RuntimeFailure::new(Boom("keep")));
        let failure: Failure<Boom> = Failure::Unchecked(original.clone());
        let escalated = failure.escalate(UncheckedFailure::nest);
        assert!(escalated.ptr_eq(&original));
    }

    #[rstest]
    fn test_map_checked_transforms_cause_only() {
        let failure: Failure<i32> = Failure::checked(404);
        let mapped = failure.map_checked(|code| format!("HTTP {code}"));
        assert_eq!(mapped.into_checked().as_deref(), Some("HTTP 404"));
    }

    #[rstest]
    fn test_question_mark_lifts_checked_cause() {
        fn parse(text: &str) -> Result<i32, Failure<std::num::ParseIntError>> {
            Ok(text.parse::<i32>()?)
        }

        assert_eq!(parse("12").ok(), Some(12));
        assert!(parse("x").is_err_and(|failure| failure.is_checked()));
    }
}
