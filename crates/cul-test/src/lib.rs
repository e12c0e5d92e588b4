//! cul-test: a small, embeddable unit-test runner
//!
//! Tests are run a "series" at a time. Every test case is a zero-argument
//! closure returning an [`Assertion`]; the [`TestSuite`] counts it, contains
//! any error or panic it raises, and prints one line for it. Each series ends
//! with a one line summary.
//!
//! Test cases that share setup code use [`set_context`]: the setup routine is
//! replayed once per [`Unit::start`] site, and each replay runs exactly one of
//! the sites, so no test case observes another's mutations.
//!
//! # Example
//!
//! ```
//! use cul_test::{test, TestSuite};
//!
//! let mut out = Vec::new();
//! {
//!     let mut suite = TestSuite::with_output(&mut out);
//!     suite.start_series("math");
//!     suite.test(|| test(2 + 2 == 4));
//!     suite.test(|| test(2 + 2 == 5));
//!     assert!(!suite.has_successes_only());
//! }
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.ends_with("math: 1/2 successful\n"));
//! ```

pub mod assertion;
pub mod context;
pub mod outcome;
pub mod position;
pub mod report;
pub mod suite;

use thiserror::Error;

/// Errors signaled to the caller of the runner; never counted as test failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuiteError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Context replay {replay} reached {found} start site(s), the first replay reached {expected}"
    )]
    NonDeterministicContext {
        replay: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for runner operations
pub type SuiteResult<T> = Result<T, SuiteError>;

pub use assertion::{test, Assertion, TestCaseResult};
pub use context::{
    set_context, set_context_strict, try_set_context, ContextReport, MakeContext, TryMakeContext,
    Unit,
};
pub use outcome::{run_protected, CaseOutcome};
pub use position::SourcePosition;
pub use report::SeriesSummary;
pub use suite::TestSuite;
