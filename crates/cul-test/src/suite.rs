//! TestSuite - runs test cases a series at a time and reports on them

use crate::assertion::TestCaseResult;
use crate::outcome::{run_protected, CaseOutcome};
use crate::position::SourcePosition;
use crate::report::{LineFormat, SeriesSummary, UNNAMED_SERIES};
use crate::SuiteResult;
use cul_config::ResolvedSuiteConfig;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// Where report lines go
enum Output<'out> {
    Stdout,
    Stream(&'out mut dyn Write),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesState {
    /// Nothing to summarize yet
    Idle,
    /// Summary still owed
    Open,
    /// Summary printed
    Closed,
}

/// A "home grown" unit test runner.
///
/// Tests are done a series at a time. Each series is named, and when it is
/// finished a one line summary is printed. By default lines go to stdout;
/// [`TestSuite::assign_output_stream`] redirects them to a borrowed writer,
/// which the borrow checker keeps alive for as long as the suite.
///
/// The open series is finished when the suite is dropped.
pub struct TestSuite<'out> {
    series: Option<String>,
    state: SeriesState,
    test_count: usize,
    test_successes: usize,
    silence_success: bool,
    format: LineFormat,
    source_position: Option<SourcePosition>,
    out: Output<'out>,
}

impl<'out> Default for TestSuite<'out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'out> TestSuite<'out> {
    /// Create a suite with no series started and zeroed counters
    pub fn new() -> Self {
        Self {
            series: None,
            state: SeriesState::Idle,
            test_count: 0,
            test_successes: 0,
            silence_success: false,
            format: LineFormat::default(),
            source_position: None,
            out: Output::Stdout,
        }
    }

    /// Create a suite and start the named series
    pub fn named(series_name: &str) -> Self {
        let mut suite = Self::new();
        suite.start_series(series_name);
        suite
    }

    /// Create a suite writing to `out` instead of stdout
    pub fn with_output(out: &'out mut dyn Write) -> Self {
        let mut suite = Self::new();
        suite.assign_output_stream(out);
        suite
    }

    /// Create a suite using loaded settings
    pub fn with_config(config: &ResolvedSuiteConfig) -> Self {
        let mut suite = Self::new();
        suite.apply_config(config);
        suite
    }

    /// Apply success visibility and color settings
    pub fn apply_config(&mut self, config: &ResolvedSuiteConfig) {
        self.silence_success = !config.show_successes;
        self.format.color = config.color;
    }

    /// Print the series header and reset the counters.
    ///
    /// A series that is still open is finished first.
    pub fn start_series(&mut self, series_name: &str) {
        self.finish_up();

        debug!(series = series_name, "starting test series");
        let header = self.format.header(series_name);
        self.write_line(&header);

        self.series = Some(series_name.to_string());
        self.state = SeriesState::Open;
        self.test_count = 0;
        self.test_successes = 0;
        self.source_position = None;
    }

    /// Run one test case.
    ///
    /// `case` must return an [`crate::Assertion`] (possibly inside a
    /// `Result`). Errors and panics raised by it are reported as failures and
    /// never escape. The pending source position, if any, is consumed.
    pub fn test<F, R>(&mut self, case: F)
    where
        F: FnOnce() -> R,
        R: TestCaseResult,
    {
        // a closed series still counts later cases but is never summarized again
        if self.state == SeriesState::Idle {
            self.state = SeriesState::Open;
        }
        self.test_count += 1;

        let outcome = run_protected(case);
        trace!(case = self.test_count, ?outcome, "test case finished");

        match &outcome {
            CaseOutcome::Passed => {
                self.test_successes += 1;
                if !self.silence_success {
                    let line = self
                        .format
                        .success(self.test_count, self.source_position.as_ref());
                    self.write_line(&line);
                }
            }
            failed => {
                let line =
                    self.format
                        .failure(self.test_count, self.source_position.as_ref(), failed);
                self.write_line(&line);
            }
        }

        self.unmark_source_position();
    }

    /// Redirect all further output to `out`
    pub fn assign_output_stream(&mut self, out: &'out mut dyn Write) {
        self.out = Output::Stream(out);
    }

    /// Tag the next test case with a source position.
    ///
    /// Fails, leaving the suite untouched, if `filename` is empty or `line`
    /// is negative.
    pub fn mark_source_position(&mut self, filename: &str, line: i64) -> SuiteResult<()> {
        self.source_position = Some(SourcePosition::new(filename, line)?);
        Ok(())
    }

    /// Tag the next test case with a compile-time position; see [`crate::mark_position!`]
    pub fn mark_here(&mut self, filename: &'static str, line: u32) -> &mut Self {
        self.source_position = Some(SourcePosition {
            file: filename.to_string(),
            line,
        });
        self
    }

    /// Drop the pending source position, if any
    pub fn unmark_source_position(&mut self) {
        self.source_position = None;
    }

    /// Print the one line summary of the open series.
    ///
    /// Only the first call per series prints; it is also called on drop.
    pub fn finish_up(&mut self) {
        if self.state != SeriesState::Open {
            return;
        }
        self.state = SeriesState::Closed;

        let summary = self.summary();
        let name = self.series.as_deref().unwrap_or(UNNAMED_SERIES);
        debug!(
            series = name,
            successes = summary.successes,
            total = summary.total,
            "finished test series"
        );
        let line = self.format.summary(name, &summary);
        self.write_line(&line);
    }

    /// True if every test case of the current series succeeded so far
    pub fn has_successes_only(&self) -> bool {
        self.test_successes == self.test_count
    }

    /// Stop printing lines for successful test cases
    pub fn hide_successes(&mut self) {
        self.silence_success = true;
    }

    /// Print a line for each successful test case
    pub fn show_successes(&mut self) {
        self.silence_success = false;
    }

    /// Number of test cases run in the current series
    pub fn test_count(&self) -> usize {
        self.test_count
    }

    /// Number of successful test cases in the current series
    pub fn success_count(&self) -> usize {
        self.test_successes
    }

    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            successes: self.test_successes,
            total: self.test_count,
        }
    }

    /// Name of the current series, if one was started
    pub fn series_name(&self) -> Option<&str> {
        self.series.as_deref()
    }

    /// True while the current series still owes its summary
    pub fn is_series_open(&self) -> bool {
        self.state == SeriesState::Open
    }

    pub fn pending_source_position(&self) -> Option<&SourcePosition> {
        self.source_position.as_ref()
    }

    fn write_line(&mut self, line: &str) {
        let result = match &mut self.out {
            Output::Stdout => writeln!(io::stdout().lock(), "{}", line),
            Output::Stream(out) => writeln!(out, "{}", line),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to write test report line");
        }
    }
}

impl Drop for TestSuite<'_> {
    fn drop(&mut self) {
        self.finish_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{test, Assertion};
    use crate::SuiteError;
    use pretty_assertions::assert_eq;

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_new_suite_is_idle() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            assert_eq!(suite.series_name(), None);
            assert!(!suite.is_series_open());
            assert!(suite.has_successes_only());
            suite.finish_up();
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_counts_and_lines() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("math");
            suite.test(|| test(2 + 2 == 4));
            suite.test(|| test(2 + 2 == 5));
            assert_eq!(suite.test_count(), 2);
            assert_eq!(suite.success_count(), 1);
        }
        assert_eq!(
            lines(out),
            vec![
                "Starting test series \"math\"",
                "[PASS] test case #1",
                "[FAIL] test case #2: assertion failed",
                "math: 1/2 successful",
            ]
        );
    }

    #[test]
    fn test_finish_up_prints_once() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("once");
            suite.finish_up();
            suite.finish_up();
        }
        assert_eq!(lines(out), vec!["Starting test series \"once\"", "once: 0/0 successful"]);
    }

    #[test]
    fn test_case_after_finish_up_keeps_series_closed() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("s");
            suite.test(|| test(true));
            suite.finish_up();
            suite.test(|| test(false));
            assert!(!suite.is_series_open());
            assert_eq!(suite.test_count(), 2);
            assert!(!suite.has_successes_only());
            suite.finish_up();
        }
        assert_eq!(
            lines(out),
            vec![
                "Starting test series \"s\"",
                "[PASS] test case #1",
                "s: 1/1 successful",
                "[FAIL] test case #2: assertion failed",
            ]
        );
    }

    #[test]
    fn test_start_series_finishes_previous() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("first");
            suite.test(|| test(false));
            suite.start_series("second");
            assert_eq!(suite.test_count(), 0);
            assert!(suite.has_successes_only());
            suite.test(|| test(true));
        }
        assert_eq!(
            lines(out),
            vec![
                "Starting test series \"first\"",
                "[FAIL] test case #1: assertion failed",
                "first: 0/1 successful",
                "Starting test series \"second\"",
                "[PASS] test case #1",
                "second: 1/1 successful",
            ]
        );
    }

    #[test]
    fn test_unnamed_series_still_summarized() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.test(|| test(true));
        }
        assert_eq!(
            lines(out),
            vec!["[PASS] test case #1", "<unnamed series>: 1/1 successful"]
        );
    }

    #[test]
    fn test_hidden_successes_still_count() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.hide_successes();
            suite.start_series("quiet");
            suite.test(|| test(true));
            suite.show_successes();
            suite.test(|| test(true));
            assert_eq!(suite.success_count(), 2);
        }
        assert_eq!(
            lines(out),
            vec![
                "Starting test series \"quiet\"",
                "[PASS] test case #2",
                "quiet: 2/2 successful",
            ]
        );
    }

    #[test]
    fn test_error_and_panic_lines() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("errors");
            suite.test(|| -> Result<Assertion, String> { Err("missing".to_string()) });
            suite.test(|| -> Assertion { panic!("boom") });
            suite.test(|| -> Assertion { std::panic::panic_any(()) });
            assert_eq!(suite.success_count(), 0);
        }
        assert_eq!(
            lines(out),
            vec![
                "Starting test series \"errors\"",
                "[FAIL] test case #1: assertion failed with message: missing",
                "[FAIL] test case #2: assertion failed with message: boom",
                "[FAIL] test case #3: assertion failed with unknown error",
                "errors: 0/3 successful",
            ]
        );
    }

    #[test]
    fn test_source_position_is_one_shot() {
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut out);
            suite.start_series("tags");
            suite.mark_source_position("tests/tags.rs", 10).unwrap();
            suite.test(|| test(false));
            assert_eq!(suite.pending_source_position(), None);
            suite.test(|| test(false));
        }
        assert_eq!(
            lines(out)[1..3],
            [
                "[FAIL] test case #1 (at tests/tags.rs:10): assertion failed",
                "[FAIL] test case #2: assertion failed",
            ]
        );
    }

    #[test]
    fn test_invalid_source_position_leaves_state() {
        let mut out = Vec::new();
        let mut suite = TestSuite::with_output(&mut out);
        suite.mark_source_position("kept.rs", 3).unwrap();

        let err = suite.mark_source_position("", 0).unwrap_err();
        assert!(matches!(err, SuiteError::InvalidArgument(_)));
        assert!(suite.mark_source_position("x.rs", -5).is_err());

        assert_eq!(
            suite.pending_source_position(),
            Some(&SourcePosition {
                file: "kept.rs".to_string(),
                line: 3,
            })
        );
        assert_eq!(suite.test_count(), 0);
    }

    #[test]
    fn test_start_series_clears_position() {
        let mut out = Vec::new();
        let mut suite = TestSuite::with_output(&mut out);
        suite.mark_source_position("a.rs", 1).unwrap();
        suite.start_series("fresh");
        assert_eq!(suite.pending_source_position(), None);
    }

    #[test]
    fn test_unmark_is_idempotent() {
        let mut suite = TestSuite::new();
        suite.unmark_source_position();
        suite.mark_source_position("a.rs", 1).unwrap();
        suite.unmark_source_position();
        suite.unmark_source_position();
        assert_eq!(suite.pending_source_position(), None);
    }

    #[test]
    fn test_broken_sink_does_not_fail_run() {
        let mut sink = BrokenSink;
        let mut suite = TestSuite::with_output(&mut sink);
        suite.start_series("broken");
        suite.test(|| test(true));
        suite.finish_up();
        assert_eq!(suite.success_count(), 1);
    }

    #[test]
    fn test_config_applies() {
        let config = ResolvedSuiteConfig {
            show_successes: false,
            color: false,
        };
        let mut out = Vec::new();
        {
            let mut suite = TestSuite::with_config(&config);
            suite.assign_output_stream(&mut out);
            suite.start_series("configured");
            suite.test(|| test(true));
        }
        assert_eq!(
            lines(out),
            vec!["Starting test series \"configured\"", "configured: 1/1 successful"]
        );
    }

    #[test]
    fn test_reassigned_stream_receives_later_lines() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        {
            let mut suite = TestSuite::with_output(&mut first);
            suite.start_series("moved");
            suite.assign_output_stream(&mut second);
            suite.test(|| test(true));
        }
        assert_eq!(lines(first), vec!["Starting test series \"moved\""]);
        assert_eq!(
            lines(second),
            vec!["[PASS] test case #1", "moved: 1/1 successful"]
        );
    }
}
