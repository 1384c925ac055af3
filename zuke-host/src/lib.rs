#![warn(missing_docs)]

//! Zuke Host: running Gherkin scenarios inside a unit-test host
//! ==========================================================
//!
//! Unit-test hosts discover and report test cases; BDD runners bind and execute steps. Zuke Host
//! sits between the two. Given a test case (a scenario, or one example row of a scenario outline)
//! it:
//!
//! 1. **Resolves** the scenario from its feature document, substituting example values into
//!    outline placeholders.
//! 2. **Sequences** the runner through feature setup, scenario setup, steps, cleanup and
//!    teardown. Teardown always runs once the steps were reached.
//! 3. **Reports** exactly one outcome (skipped, passed or failed) and then `Finished` to the
//!    host, canceling the run if the host stops listening.
//!
//! ```no_run
//! use std::sync::Arc;
//! use zuke_host::*;
//!
//! # async fn example(factory: impl RunnerFactory + 'static) {
//! let bridge = ScenarioBridge::new(
//!     BridgeOptions::default(),
//!     Arc::new(GherkinSource::new()),
//!     Arc::new(RunnerRegistry::new(factory)),
//! );
//!
//! let project = Project::new("calculator", "/src/calculator");
//! let case = TestCase::example(
//!     FeatureFile::new(project, "features/add.feature"),
//!     "Add numbers",
//!     2usize,
//! );
//!
//! let (bus, _messages) = ChannelBus::new(16);
//! let summary = bridge
//!     .run(
//!         &case,
//!         Host {
//!             bus: &bus,
//!             output: Some(Arc::new(OutputCapture::new())),
//!             aggregator: &ErrorAggregator::new(),
//!             cancel: &Flag::new(),
//!         },
//!     )
//!     .await;
//! assert_eq!(summary.total, 1);
//! bridge.runners().shutdown().unwrap();
//! # }
//! ```

pub mod aggregator;
pub mod argument;
pub mod bridge;
pub mod capture;
pub mod case;
pub mod culture;
pub mod document;
pub mod error;
pub mod flag;
mod lifecycle;
pub mod message;
pub mod options;
pub mod outcome;
#[doc(hidden)]
pub mod panic;
pub mod registry;
pub mod resolve;
pub mod runner;
pub mod source;

pub use aggregator::*;
pub use argument::*;
pub use bridge::*;
pub use capture::*;
pub use case::*;
pub use culture::*;
pub use document::*;
pub use error::*;
pub use flag::*;
pub use message::*;
pub use options::*;
pub use outcome::*;
pub use registry::*;
pub use resolve::*;
pub use runner::*;
pub use source::*;
