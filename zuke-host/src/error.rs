//! Errors raised by the bridge itself

use std::fmt;
use thiserror::Error;

/// Failures that originate in the bridge rather than in a runner collaborator.
///
/// Collaborator errors are carried as plain [`anyhow::Error`]s; these variants are the ones the
/// bridge raises on its own account, and are usually found wrapped inside an `anyhow::Error` in a
/// failed [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum Error {
    /// No output capture sink was handed to the bridge. This is a host configuration problem, so
    /// the case fails instead of being skipped.
    #[error("No output capture is available for scenario {scenario:?}")]
    MissingOutput {
        /// The scenario that was about to start
        scenario: String,
    },
    /// The feature declared a language tag that could not be understood.
    #[error("Unrecognised feature language {language:?}: {reason}")]
    Language {
        /// The tag as written in the feature
        language: String,
        /// Why it was rejected
        reason: String,
    },
    /// A teardown hook raised after an earlier stage had already raised. The teardown error is
    /// the terminal one; the error it superseded is kept for diagnosis.
    #[error("{teardown:#}\n(raised while cleaning up after: {original:#})")]
    Teardown {
        /// The error raised by teardown
        teardown: anyhow::Error,
        /// The earlier error
        original: anyhow::Error,
    },
    /// More than one error was collected for a single test case.
    #[error("{0}")]
    Aggregate(ErrorList),
    /// A collaborator panicked.
    #[error("Panicked: {0}")]
    Panicked(String),
}

/// The errors held by [`Error::Aggregate`], in the order they were raised.
#[derive(Debug)]
pub struct ErrorList(pub Vec<anyhow::Error>);

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors occurred:", self.0.len())?;
        for (i, e) in self.0.iter().enumerate() {
            write!(f, "\n  {}) {:#}", i + 1, e)?;
        }
        Ok(())
    }
}
