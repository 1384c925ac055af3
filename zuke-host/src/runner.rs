//! The BDD runner collaborator
//!
//! A runner owns hook dispatch and step binding. The bridge only drives it: it calls the
//! lifecycle hooks in a fixed order and hands each step to the entry point matching its role.

use crate::argument::DataTable;
use crate::capture::TestOutput;
use crate::document::StepKeyword;
use std::path::PathBuf;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Feature metadata passed to [`BddRunner::on_feature_start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    /// Culture the feature's steps are bound in. Always region specific.
    pub language: LanguageIdentifier,
    /// Folder of the feature file, relative to the project root
    pub folder: Option<PathBuf>,
    /// Feature name
    pub title: String,
    /// Feature description
    pub description: Option<String>,
    /// Feature-level tags
    pub tags: Vec<String>,
}

/// Scenario metadata passed to [`BddRunner::on_scenario_start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioInfo {
    /// Scenario name
    pub title: String,
    /// Scenario description
    pub description: Option<String>,
    /// The scenario's own tags
    pub tags: Vec<String>,
}

/// Capabilities the bridge can inject into a running scenario.
#[non_exhaustive]
#[derive(Clone)]
pub enum Injectable {
    /// Where step bindings should write their output
    Output(Arc<dyn TestOutput>),
}

/// A BDD runner shared by every test case of one project.
///
/// Runners are used concurrently by independent test cases, so every method takes `&self`;
/// keeping per-scenario state apart is the runner's responsibility. Step entry points record
/// failures rather than relying on callers to stop; [`BddRunner::collect_scenario_errors`] is
/// where recorded failures surface as an error. An entry point may still return an error (or
/// panic), in which case the bridge stops executing further steps.
pub trait BddRunner: Send + Sync {
    /// A feature is about to run
    fn on_feature_start(&self, feature: &FeatureInfo) -> anyhow::Result<()>;

    /// The current feature is done
    fn on_feature_end(&self) -> anyhow::Result<()>;

    /// A scenario is about to run
    fn on_scenario_start(&self, scenario: &ScenarioInfo) -> anyhow::Result<()>;

    /// The current scenario is done
    fn on_scenario_end(&self) -> anyhow::Result<()>;

    /// Raise any errors recorded while executing the current scenario's steps
    fn collect_scenario_errors(&self) -> anyhow::Result<()>;

    /// Make a capability available to the current scenario's step bindings
    fn register(&self, injectable: Injectable) -> anyhow::Result<()>;

    /// Execute a `Given` step
    fn given(
        &self,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()>;

    /// Execute a `When` step
    fn when(
        &self,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()>;

    /// Execute a `Then` step
    fn then(
        &self,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()>;

    /// Execute an `And` step
    fn and(
        &self,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()>;

    /// Execute a `But` step
    fn but(
        &self,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()>;

    /// The whole test run is over. Called once by [`crate::RunnerRegistry::shutdown`].
    fn on_test_run_end(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl dyn BddRunner + '_ {
    /// Dispatch a step to the entry point for its role
    pub fn execute(
        &self,
        role: StepKeyword,
        text: &str,
        doc_string: Option<&str>,
        table: Option<&DataTable>,
        keyword: &str,
    ) -> anyhow::Result<()> {
        match role {
            StepKeyword::Given => self.given(text, doc_string, table, keyword),
            StepKeyword::When => self.when(text, doc_string, table, keyword),
            StepKeyword::Then => self.then(text, doc_string, table, keyword),
            StepKeyword::And => self.and(text, doc_string, table, keyword),
            StepKeyword::But => self.but(text, doc_string, table, keyword),
        }
    }
}
