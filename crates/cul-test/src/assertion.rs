//! Assertion - the verdict a test case returns

use std::fmt;

/// The verdict of a single test case.
///
/// A test case must return this (or a `Result` wrapping it), never a bare
/// `bool`; the only way to make one is [`test`].
#[must_use = "a test case verdict has no effect unless returned to the suite"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assertion {
    value: bool,
}

/// Converts a boolean into the [`Assertion`] a test case returns.
pub fn test(value: bool) -> Assertion {
    Assertion { value }
}

impl Assertion {
    pub(crate) fn holds(self) -> bool {
        self.value
    }
}

/// Anything a test case may return.
///
/// `Err` values are "recognized" errors: the suite reports them as failures
/// carrying the error's text.
pub trait TestCaseResult {
    fn into_verdict(self) -> Result<Assertion, String>;
}

impl TestCaseResult for Assertion {
    fn into_verdict(self) -> Result<Assertion, String> {
        Ok(self)
    }
}

impl<E: fmt::Display> TestCaseResult for Result<Assertion, E> {
    fn into_verdict(self) -> Result<Assertion, String> {
        self.map_err(|e| e.to_string())
    }
}
