//! Source positions attached to the next test case

use crate::{SuiteError, SuiteResult};
use std::fmt;

/// A file/line tag shown on the report line of one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    pub file: String,
    pub line: u32,
}

impl SourcePosition {
    /// Validate a caller-supplied position.
    ///
    /// Fails if `file` is empty or `line` is negative or too large.
    pub fn new(file: &str, line: i64) -> SuiteResult<Self> {
        if file.is_empty() {
            return Err(SuiteError::InvalidArgument(
                "source file name must not be empty".to_string(),
            ));
        }
        let line = u32::try_from(line).map_err(|_| {
            SuiteError::InvalidArgument(format!("invalid source line number {}", line))
        })?;

        Ok(Self {
            file: file.to_string(),
            line,
        })
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Marks the current source position on a suite for the next test case.
///
/// Evaluates to `&mut TestSuite`, so a test can be chained:
///
/// ```
/// use cul_test::{mark_position, test, TestSuite};
///
/// let mut out = Vec::new();
/// let mut suite = TestSuite::with_output(&mut out);
/// mark_position!(suite).test(|| test(1 < 2));
/// ```
#[macro_export]
macro_rules! mark_position {
    ($suite:expr) => {
        ($suite).mark_here(::std::file!(), ::std::line!())
    };
}
