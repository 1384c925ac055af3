//! Test outcomes

use std::fmt;
use std::ops::AddAssign;
use std::sync::Arc;

/// What happened to a test case
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The case did not run
    Skipped {
        /// Human readable reason
        reason: String,
    },
    /// The case ran without error
    Passed,
    /// The case raised an error at some point of its lifecycle
    Failed {
        /// The terminal error
        error: Arc<anyhow::Error>,
    },
}

/// The verdict of an [`Outcome`], without any detail
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Ord, Eq)]
pub enum Verdict {
    /// The case was skipped
    Skipped,
    /// The case passed
    Passed,
    /// The case failed
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Verdict::Skipped => "skipped",
            Verdict::Passed => "passed",
            Verdict::Failed => "failed",
        };

        f.write_str(msg)
    }
}

impl Outcome {
    /// Skip with a reason
    pub fn skip<S: Into<String>>(reason: S) -> Self {
        Outcome::Skipped {
            reason: reason.into(),
        }
    }

    /// Fail with an error
    pub fn fail(error: anyhow::Error) -> Self {
        Outcome::Failed {
            error: Arc::new(error),
        }
    }

    /// Passed if there is no error, failed otherwise
    pub fn from_error(error: Option<anyhow::Error>) -> Self {
        match error {
            None => Outcome::Passed,
            Some(e) => Self::fail(e),
        }
    }

    /// The verdict
    pub fn verdict(&self) -> Verdict {
        match self {
            Outcome::Skipped { .. } => Verdict::Skipped,
            Outcome::Passed => Verdict::Passed,
            Outcome::Failed { .. } => Verdict::Failed,
        }
    }

    /// Return true if the case passed
    pub fn passed(&self) -> bool {
        self.verdict() == Verdict::Passed
    }

    /// Return true if the case was skipped
    pub fn skipped(&self) -> bool {
        self.verdict() == Verdict::Skipped
    }

    /// Return true if the case failed
    pub fn failed(&self) -> bool {
        self.verdict() == Verdict::Failed
    }

    /// The error, for failed cases
    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Outcome::Failed { error } => Some(&**error),
            _ => None,
        }
    }

    /// The reason, for skipped cases
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Outcome::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verdict())?;

        match self {
            Outcome::Skipped { reason } => write!(f, " ({})", reason)?,
            Outcome::Failed { error } => write!(f, " ({:#})", error)?,
            Outcome::Passed => (),
        }

        Ok(())
    }
}

/// A summary of how many cases ran, failed and were skipped, and how long they took.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// number of cases
    pub total: usize,
    /// number of failed cases
    pub failed: usize,
    /// number of skipped cases
    pub skipped: usize,
    /// elapsed time, in seconds
    pub time: f64,
}

impl RunSummary {
    /// The summary of a single case
    pub fn single(outcome: &Outcome, time: f64) -> Self {
        Self {
            total: 1,
            failed: usize::from(outcome.failed()),
            skipped: usize::from(outcome.skipped()),
            time,
        }
    }
}

impl AddAssign<&RunSummary> for RunSummary {
    fn add_assign(&mut self, other: &RunSummary) {
        self.total += other.total;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.time += other.time;
    }
}
