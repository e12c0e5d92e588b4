//! Protected invocation of a single test case

use crate::assertion::TestCaseResult;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// How a single test case ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Returned a true assertion
    Passed,
    /// Returned a false assertion
    Failed,
    /// Returned an error, or panicked with a message
    Errored(String),
    /// Panicked with a payload that carries no message
    Unknown,
}

impl CaseOutcome {
    /// Check if this outcome is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }

    /// Check if this outcome counts as a failure
    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }

    /// Text attached to the failure, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CaseOutcome::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Runs `case`, converting whatever it returns or raises into a [`CaseOutcome`].
///
/// Nothing escapes: errors and panics both become failing outcomes.
pub fn run_protected<F, R>(case: F) -> CaseOutcome
where
    F: FnOnce() -> R,
    R: TestCaseResult,
{
    match panic::catch_unwind(AssertUnwindSafe(|| case().into_verdict())) {
        Ok(Ok(assertion)) if assertion.holds() => CaseOutcome::Passed,
        Ok(Ok(_)) => CaseOutcome::Failed,
        Ok(Err(message)) => CaseOutcome::Errored(message),
        Err(payload) => match panic_message(payload.as_ref()) {
            Some(message) => CaseOutcome::Errored(message),
            None => CaseOutcome::Unknown,
        },
    }
}

/// Message of a panic payload raised through `panic!`
fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some(s.to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}
