//! Shared contexts - replaying one setup routine per test case
//!
//! Several test cases often need the same, possibly expensive, setup. Rather
//! than snapshotting state, [`set_context`] runs the whole setup routine once
//! per test case. The routine offers its test cases through [`Unit::start`];
//! on replay `k` only the `k`-th `start` call runs its case, so every case
//! sees a freshly built context and none observes another's changes.
//!
//! The setup routine is a plain `fn`, not a capturing closure: whatever it
//! builds must be built inside it, or replays would not be independent.
//!
//! ```
//! use cul_test::{set_context, test, TestSuite};
//!
//! let mut out = Vec::new();
//! let mut suite = TestSuite::with_output(&mut out);
//! suite.start_series("sample list");
//! set_context(&mut suite, |suite, unit| {
//!     let sample = vec![7, 8, 9];
//!     unit.start(suite, || test(sample.len() == 3));
//!     unit.start(suite, || test(sample[0] == 7));
//! });
//! assert_eq!(suite.test_count(), 2);
//! assert!(suite.has_successes_only());
//! ```

use crate::assertion::TestCaseResult;
use crate::suite::TestSuite;
use crate::{SuiteError, SuiteResult};
use std::convert::Infallible;
use tracing::{debug, trace};

/// Setup routine driven by [`set_context`]
pub type MakeContext = fn(&mut TestSuite<'_>, &mut Unit);

/// Fallible setup routine driven by [`try_set_context`]
pub type TryMakeContext<E> = fn(&mut TestSuite<'_>, &mut Unit) -> Result<(), E>;

/// Handed to a setup routine; selects which `start` site runs on this replay.
///
/// Only the context drivers can create one.
#[derive(Debug)]
pub struct Unit {
    starts: usize,
    index: usize,
    hit: bool,
}

/// What a strict context run observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextReport {
    /// Number of times the setup routine ran
    pub replays: usize,
    /// Number of `start` sites, and so of test cases submitted
    pub sites: usize,
}

impl Unit {
    fn armed_at(index: usize) -> Self {
        Self {
            starts: 0,
            index,
            hit: false,
        }
    }

    /// Offer a test case; it runs only if this is the armed site of the replay.
    ///
    /// A case that runs goes through [`TestSuite::test`] like any other.
    pub fn start<F, R>(&mut self, suite: &mut TestSuite<'_>, case: F)
    where
        F: FnOnce() -> R,
        R: TestCaseResult,
    {
        if self.starts == self.index {
            self.hit = true;
            suite.test(case);
        }
        self.starts += 1;
    }

    /// Ordinal of the site armed on this replay
    pub fn armed_index(&self) -> usize {
        self.index
    }

    /// Number of `start` calls made so far on this replay
    pub fn sites_reached(&self) -> usize {
        self.starts
    }
}

/// Runs `make_context` until a replay arms no `start` site.
///
/// With `n` sites the routine runs `n + 1` times. Panics raised by the
/// routine itself, outside any test case, propagate to the caller.
pub fn set_context(suite: &mut TestSuite<'_>, make_context: MakeContext) {
    let replayed: Result<usize, Infallible> = replay(suite, |suite, unit| {
        make_context(suite, unit);
        Ok(())
    });
    match replayed {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

/// Like [`set_context`], but the routine may fail; the first error stops the
/// replays and is returned.
pub fn try_set_context<E>(
    suite: &mut TestSuite<'_>,
    make_context: TryMakeContext<E>,
) -> Result<(), E> {
    replay(suite, make_context).map(|_| ())
}

/// Like [`set_context`], but checks that every replay reaches the same number
/// of `start` sites as the first one.
///
/// A routine whose site count changes between replays depends on state from
/// outside itself; its test cases may have been skipped or run twice.
pub fn set_context_strict(
    suite: &mut TestSuite<'_>,
    make_context: MakeContext,
) -> SuiteResult<ContextReport> {
    let mut expected: Option<usize> = None;
    let sites = replay(suite, |suite, unit| {
        make_context(suite, unit);
        match expected {
            None => {
                expected = Some(unit.starts);
                Ok(())
            }
            Some(first) if first == unit.starts => Ok(()),
            Some(first) => Err(SuiteError::NonDeterministicContext {
                replay: unit.index,
                expected: first,
                found: unit.starts,
            }),
        }
    })?;

    Ok(ContextReport {
        replays: sites + 1,
        sites,
    })
}

/// Replay loop shared by the drivers; returns the number of armed sites
fn replay<E, F>(suite: &mut TestSuite<'_>, mut run_once: F) -> Result<usize, E>
where
    F: FnMut(&mut TestSuite<'_>, &mut Unit) -> Result<(), E>,
{
    let mut index = 0;
    loop {
        let mut unit = Unit::armed_at(index);
        run_once(&mut *suite, &mut unit)?;
        if !unit.hit {
            debug!(sites = index, "context replay finished");
            return Ok(index);
        }
        trace!(index, "context site ran");
        index += 1;
    }
}
