//! Running test cases on behalf of the host
//!
//! [`ScenarioBridge::run`] is the whole job: fetch the feature document, resolve the scenario,
//! decide whether it should be skipped, drive the runner through the lifecycle, and report exactly
//! one outcome followed by `Finished`.

use crate::aggregator::ErrorAggregator;
use crate::capture::TestOutput;
use crate::case::TestCase;
use crate::document::FeatureDocument;
use crate::flag::Flag;
use crate::lifecycle::Lifecycle;
use crate::message::{Message, MessageBus, MessageKind};
use crate::options::BridgeOptions;
use crate::outcome::{Outcome, RunSummary};
use crate::registry::RunnerRegistry;
use crate::resolve::resolve;
use crate::source::DocumentSource;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// What the host hands over for one test case
pub struct Host<'a> {
    /// Where outcome messages go
    pub bus: &'a dyn MessageBus,
    /// Output sink for the scenario. Running a scenario without one fails it.
    pub output: Option<Arc<dyn TestOutput>>,
    /// The host's aggregator. Errors it already holds fail the case.
    pub aggregator: &'a ErrorAggregator,
    /// Set to cancel the rest of the run
    pub cancel: &'a Flag,
}

/// How a case ended, before it is reported
struct Execution {
    started: DateTime<Utc>,
    outcome: Outcome,
    time: f64,
    output: String,
}

impl Execution {
    fn skipped<S: Into<String>>(started: DateTime<Utc>, reason: S) -> Self {
        Self {
            started,
            outcome: Outcome::skip(reason),
            time: 0.0,
            output: String::new(),
        }
    }
}

/// Runs test cases against their feature documents and the project's shared runner
pub struct ScenarioBridge {
    options: BridgeOptions,
    documents: Arc<dyn DocumentSource>,
    runners: Arc<RunnerRegistry>,
}

impl ScenarioBridge {
    /// Create a bridge
    pub fn new(
        options: BridgeOptions,
        documents: Arc<dyn DocumentSource>,
        runners: Arc<RunnerRegistry>,
    ) -> Self {
        Self {
            options,
            documents,
            runners,
        }
    }

    /// The bridge's options
    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// The runner registry. Call [`RunnerRegistry::shutdown`] on it when the test run ends.
    pub fn runners(&self) -> &Arc<RunnerRegistry> {
        &self.runners
    }

    /// Run one test case and report it on the host's bus.
    ///
    /// Whatever happens, the bus is offered exactly one outcome message and then `Finished`,
    /// unless the run was already canceled, in which case only `Finished` is sent. If the bus
    /// rejects a message, `host.cancel` is set.
    pub async fn run(&self, case: &TestCase, host: Host<'_>) -> RunSummary {
        let started = Utc::now();
        let mut aggregator = ErrorAggregator::nested(host.aggregator);

        let document = match self.documents.document(case.feature()).await {
            Ok(doc) => doc,
            Err(e) => {
                aggregator.add(e.context(format!("Unable to load {}", case.feature())));
                None
            }
        };

        info_span!("test_case", test = %case.unique_id()).in_scope(|| {
            let execution = self.execute(
                started,
                case,
                document.as_deref(),
                host.output.as_ref(),
                &mut aggregator,
            );
            report(case, execution, host.bus, host.cancel)
        })
    }

    fn execute(
        &self,
        started: DateTime<Utc>,
        case: &TestCase,
        document: Option<&FeatureDocument>,
        output: Option<&Arc<dyn TestOutput>>,
        aggregator: &mut ErrorAggregator,
    ) -> Execution {
        let found = document.and_then(|doc| resolve(doc, case).map(|scenario| (doc, scenario)));

        let stopwatch = Instant::now();
        match &found {
            Some((_, scenario))
                if scenario.has_tag(&self.options.ignore_tag) && !aggregator.has_errors() =>
            {
                debug!(tag = self.options.ignore_tag.as_str(), "scenario is ignored");
                return Execution::skipped(started, "Ignored");
            }
            None if !aggregator.has_errors() => {
                debug!("scenario not found");
                let reason = format!("Unable to find Scenario: {}", case.display_name());
                return Execution::skipped(started, reason);
            }
            Some((document, scenario)) if !aggregator.has_errors() => {
                let lifecycle = Lifecycle {
                    runners: &self.runners,
                    options: &self.options,
                    file: case.feature(),
                    document,
                    scenario,
                    output,
                };
                aggregator.run(|| lifecycle.run());
            }
            // errors from the host or from fetching the document
            _ => (),
        }

        Execution {
            started,
            outcome: Outcome::from_error(aggregator.take_error()),
            time: stopwatch.elapsed().as_secs_f64(),
            output: output.map(|o| o.output()).unwrap_or_default(),
        }
    }
}

fn report(
    case: &TestCase,
    execution: Execution,
    bus: &dyn MessageBus,
    cancel: &Flag,
) -> RunSummary {
    let Execution {
        started,
        outcome,
        time,
        output,
    } = execution;

    let summary = RunSummary::single(&outcome, time);
    info!(outcome = %outcome, time, "test case finished");

    let message = |kind| Message {
        test: case.unique_id(),
        display_name: case.display_name().to_string(),
        started,
        time,
        output: output.clone(),
        kind,
    };

    if cancel.is_set() {
        debug!("run canceled, outcome not reported");
    } else if !bus.queue(message(MessageKind::Outcome(outcome))) {
        warn!("host rejected the outcome message, canceling the run");
        cancel.set();
    }

    if !bus.queue(message(MessageKind::Finished)) {
        warn!("host rejected the finished message, canceling the run");
        cancel.set();
    }

    summary
}
