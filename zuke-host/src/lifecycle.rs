//! Driving a runner through one scenario
//!
//! The order is fixed: feature setup, scenario setup, steps, scenario cleanup, then scenario and
//! feature teardown. Cleanup and teardown run whenever the steps were reached, whatever happened
//! to them.

use crate::argument::{DataTable, StepArgument};
use crate::case::FeatureFile;
use crate::capture::TestOutput;
use crate::culture::feature_culture;
use crate::document::FeatureDocument;
use crate::error::Error;
use crate::options::BridgeOptions;
use crate::panic::PanicToError;
use crate::registry::RunnerRegistry;
use crate::resolve::ResolvedScenario;
use crate::runner::{BddRunner, FeatureInfo, Injectable, ScenarioInfo};
use anyhow::Context as _;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything one lifecycle run needs
pub(crate) struct Lifecycle<'a> {
    pub runners: &'a RunnerRegistry,
    pub options: &'a BridgeOptions,
    pub file: &'a FeatureFile,
    pub document: &'a FeatureDocument,
    pub scenario: &'a ResolvedScenario,
    pub output: Option<&'a Arc<dyn TestOutput>>,
}

impl Lifecycle<'_> {
    /// Run the whole lifecycle, returning the terminal error if any stage raised.
    pub fn run(&self) -> anyhow::Result<()> {
        let runner = self.feature_setup()?;
        let runner = &*runner;
        self.scenario_setup(runner)?;

        guarded(
            || {
                let steps = PanicToError::from(|| self.execute_steps(runner)).call_once();
                debug!("scenario cleanup");
                let cleanup = PanicToError::from(|| runner.collect_scenario_errors()).call_once();
                supersede(steps, cleanup)
            },
            || {
                debug!("scenario teardown");
                let scenario_end = PanicToError::from(|| runner.on_scenario_end()).call_once();
                debug!("feature teardown");
                let feature_end = PanicToError::from(|| runner.on_feature_end()).call_once();
                supersede(scenario_end, feature_end)
            },
        )
    }

    fn feature_setup(&self) -> anyhow::Result<Arc<dyn BddRunner>> {
        let project = self.file.project();
        let runner = self
            .runners
            .runner_for(project)
            .with_context(|| format!("Could not create a runner for {}", project.name()))?;

        let info = FeatureInfo {
            language: feature_culture(&self.document.language, &self.options.fallback_culture)?,
            folder: self.file.folder().map(Path::to_path_buf),
            title: self.document.name.clone(),
            description: self.document.description.clone(),
            tags: self.document.tags.clone(),
        };

        debug!(feature = info.title.as_str(), language = %info.language, "feature setup");
        runner.on_feature_start(&info)?;
        Ok(runner)
    }

    fn scenario_setup(&self, runner: &dyn BddRunner) -> anyhow::Result<()> {
        let output = self.output.ok_or_else(|| Error::MissingOutput {
            scenario: self.scenario.name.clone(),
        })?;

        debug!(scenario = self.scenario.name.as_str(), "scenario setup");
        runner.on_scenario_start(&ScenarioInfo {
            title: self.scenario.name.clone(),
            description: self.scenario.description.clone(),
            tags: self.scenario.tags.clone(),
        })?;
        runner.register(Injectable::Output(output.clone()))
    }

    /// Background steps, then the scenario's own. The first step to raise stops the rest; scenario
    /// cleanup still runs afterwards.
    fn execute_steps(&self, runner: &dyn BddRunner) -> anyhow::Result<()> {
        for step in self.scenario.all_steps() {
            debug!(keyword = %step.keyword, text = step.text.as_str(), "step");

            let argument = step.argument.as_ref();
            let doc_string = argument.and_then(StepArgument::doc_string);
            let table = argument
                .and_then(StepArgument::table)
                .and_then(DataTable::from_table);

            runner
                .execute(
                    step.keyword,
                    &step.text,
                    doc_string,
                    table.as_ref(),
                    &step.keyword_text,
                )
                .with_context(|| {
                    format!("Step failed: {} {}", step.keyword_text.trim(), step.text)
                })?;
        }

        Ok(())
    }
}

/// Run `body`, then `cleanup` no matter how `body` ended (including by panicking).
fn guarded<B, C>(body: B, cleanup: C) -> anyhow::Result<()>
where
    B: FnOnce() -> anyhow::Result<()>,
    C: FnOnce() -> anyhow::Result<()>,
{
    let result = PanicToError::from(body).call_once();
    let cleanup = PanicToError::from(cleanup).call_once();
    supersede(result, cleanup)
}

/// Combine the results of two stages. A later error is the terminal one, but keeps the earlier
/// error it replaced.
fn supersede(earlier: anyhow::Result<()>, later: anyhow::Result<()>) -> anyhow::Result<()> {
    match (earlier, later) {
        (earlier, Ok(())) => earlier,
        (Ok(()), Err(e)) => Err(e),
        (Err(original), Err(teardown)) => {
            warn!(
                error = %format!("{:#}", original),
                "error superseded by a later cleanup failure"
            );
            Err(Error::Teardown { teardown, original }.into())
        }
    }
}
