//! Recovering from checked causes with a substitute computation.

use std::fmt;

use crate::bridge::{ContractViolation, Failure, UncheckedFailure};
use crate::computation::{Computation, Outcome};

/// A computation that answers checked causes with a substitute.
///
/// Created by [`recover`](crate::computation::ComputationExt::recover).
///
/// The inputs are cloned once before the inner computation runs, so the
/// substitute receives the same inputs. The substitute's outcome is returned
/// without further handling: a failing substitute is neither retried nor
/// recovered again.
///
/// | Inner failure | Result |
/// |---|---|
/// | panic | propagates |
/// | `Failure::Unchecked(u)` | `Failure::Unchecked(u)` |
/// | `Failure::Checked(cause)`, `recovery` gives `Some(s)` | `s.apply(args)` |
/// | `Failure::Checked(cause)`, `recovery` gives `None` | `UncheckedFailure::ContractViolation` |
#[derive(Clone)]
pub struct Recovered<C, R> {
    computation: C,
    recovery: R,
}

impl<C, R> Recovered<C, R> {
    pub(crate) const fn new(computation: C, recovery: R) -> Self {
        Self {
            computation,
            recovery,
        }
    }

    /// Returns the wrapped computation.
    pub fn into_inner(self) -> C {
        self.computation
    }
}

impl<C, R, S, Args> Computation<Args> for Recovered<C, R>
where
    Args: Clone,
    C: Computation<Args>,
    C::Error: fmt::Display,
    R: Fn(&C::Error) -> Option<S>,
    S: Computation<Args, Output = C::Output>,
{
    type Output = C::Output;
    type Error = S::Error;

    fn apply(&self, args: Args) -> Outcome<C::Output, S::Error> {
        let cause = match self.computation.apply(args.clone()) {
            Ok(output) => return Ok(output),
            Err(Failure::Unchecked(failure)) => return Err(Failure::Unchecked(failure)),
            Err(Failure::Checked(cause)) => cause,
        };

        match (self.recovery)(&cause) {
            Some(substitute) => {
                tracing::debug!(
                    cause = std::any::type_name::<C::Error>(),
                    "recovering checked failure with substitute"
                );
                substitute.apply(args)
            }
            None => {
                let violation = ContractViolation::missing_substitute(&cause);
                tracing::warn!(%violation, "recovery function returned no substitute");
                Err(Failure::Unchecked(UncheckedFailure::ContractViolation(violation)))
            }
        }
    }
}

impl<C: fmt::Debug, R> fmt::Debug for Recovered<C, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Recovered")
            .field("computation", &self.computation)
            .finish_non_exhaustive()
    }
}
