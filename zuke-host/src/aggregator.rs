//! Error aggregation
//!
//! Every test case runs inside its own [`ErrorAggregator`], nested under one owned by the host.
//! Errors already held by the outer aggregator are copied into the nested one, so a failure at an
//! outer scope fails every case run beneath it.

use crate::error::{Error, ErrorList};
use crate::panic::PanicToError;

/// Collects errors raised while running a test case
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    errors: Vec<anyhow::Error>,
}

impl ErrorAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator scoped under `parent`, starting with copies of its errors.
    pub fn nested(parent: &ErrorAggregator) -> Self {
        Self {
            errors: parent
                .errors
                .iter()
                .map(|e| anyhow::anyhow!("{:#}", e))
                .collect(),
        }
    }

    /// Run `func`, recording its error (or panic) if it fails.
    pub fn run<T, F>(&mut self, func: F) -> Option<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        match PanicToError::from(func).call_once() {
            Ok(v) => Some(v),
            Err(e) => {
                self.add(e);
                None
            }
        }
    }

    /// Record an error
    pub fn add(&mut self, err: anyhow::Error) -> &mut Self {
        self.errors.push(err);
        self
    }

    /// Has anything been recorded?
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the recorded errors as one terminal error, leaving the aggregator empty. Several
    /// errors are wrapped in [`Error::Aggregate`].
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        let mut errors = std::mem::take(&mut self.errors);
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Error::Aggregate(ErrorList(errors)).into()),
        }
    }
}
