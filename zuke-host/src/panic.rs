//! Helpers for dealing with panics in collaborator code.
//!
//! Step bindings are free to use `assert!`, so a runner may unwind out of any of its entry points.
//! The bridge must still run teardown and report a failed case, so every call into a collaborator
//! goes through [`PanicToError`].

use crate::error::Error;
use std::any::Any;
use std::ffi::{OsStr, OsString};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Wraps a fallible closure so that a panic becomes an [`Error::Panicked`].
pub struct PanicToError<F>(F);

impl<T, E, F> From<F> for PanicToError<F>
where
    E: Into<anyhow::Error>,
    F: FnOnce() -> Result<T, E>,
{
    fn from(func: F) -> Self {
        Self(func)
    }
}

impl<T, E, F> PanicToError<F>
where
    E: Into<anyhow::Error>,
    F: FnOnce() -> Result<T, E>,
{
    /// Call the closure, flattening a panic into an error.
    pub fn call_once(self) -> anyhow::Result<T> {
        let Self(func) = self;
        match catch_unwind(AssertUnwindSafe(func)) {
            Ok(r) => r.map_err(Into::into),
            Err(panic) => Err(to_error(panic)),
        }
    }
}

fn to_error(panic: Box<dyn Any + Send + 'static>) -> anyhow::Error {
    let msg = if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&OsStr>() {
        msg.to_string_lossy().into_owned()
    } else if let Some(msg) = panic.downcast_ref::<OsString>() {
        msg.to_string_lossy().into_owned()
    } else {
        "(No message available)".to_string()
    };

    Error::Panicked(msg).into()
}
