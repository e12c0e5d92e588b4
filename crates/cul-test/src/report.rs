//! Report lines - header, per-case, and summary formatting

use crate::outcome::CaseOutcome;
use crate::position::SourcePosition;
use colored::*;
use std::fmt;

/// Placeholder for a series that was never given a name
pub const UNNAMED_SERIES: &str = "<unnamed series>";

/// Success/total counts of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesSummary {
    pub successes: usize,
    pub total: usize,
}

impl SeriesSummary {
    /// True if no test case failed; an empty series is clean
    pub fn is_clean(&self) -> bool {
        self.successes == self.total
    }

    pub fn failures(&self) -> usize {
        self.total - self.successes
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} successful", self.successes, self.total)
    }
}

/// Formats the lines a suite writes
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LineFormat {
    pub color: bool,
}

impl LineFormat {
    pub fn header(&self, name: &str) -> String {
        format!("Starting test series \"{}\"", name)
    }

    pub fn success(&self, case: usize, position: Option<&SourcePosition>) -> String {
        format!("{} {}", self.paint_pass("[PASS]"), case_label(case, position))
    }

    pub fn failure(
        &self,
        case: usize,
        position: Option<&SourcePosition>,
        outcome: &CaseOutcome,
    ) -> String {
        let reason = match outcome {
            CaseOutcome::Errored(message) => {
                format!("assertion failed with message: {}", message)
            }
            CaseOutcome::Unknown => "assertion failed with unknown error".to_string(),
            CaseOutcome::Passed | CaseOutcome::Failed => "assertion failed".to_string(),
        };
        format!(
            "{} {}: {}",
            self.paint_fail("[FAIL]"),
            case_label(case, position),
            reason
        )
    }

    pub fn summary(&self, name: &str, summary: &SeriesSummary) -> String {
        let counts = summary.to_string();
        let counts = if !self.color {
            counts
        } else if summary.is_clean() {
            counts.green().bold().to_string()
        } else {
            counts.red().bold().to_string()
        };
        format!("{}: {}", name, counts)
    }

    fn paint_pass(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_fail(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn case_label(case: usize, position: Option<&SourcePosition>) -> String {
    match position {
        Some(position) => format!("test case #{} (at {})", case, position),
        None => format!("test case #{}", case),
    }
}
