//! One shared runner per project
//!
//! Runners are expensive to create (they load a project's step bindings), so every test case of a
//! project shares one. The registry owns them and tears them all down at the end of the test run.

use crate::case::Project;
use crate::runner::BddRunner;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Creates the runner for a project, loading whatever the project's step bindings need.
pub trait RunnerFactory: Send + Sync {
    /// Create a runner for `project`
    fn create(&self, project: &Project) -> anyhow::Result<Arc<dyn BddRunner>>;
}

impl<F> RunnerFactory for F
where
    F: Fn(&Project) -> anyhow::Result<Arc<dyn BddRunner>> + Send + Sync,
{
    fn create(&self, project: &Project) -> anyhow::Result<Arc<dyn BddRunner>> {
        self(project)
    }
}

/// Registry of shared runners, keyed by project name
pub struct RunnerRegistry {
    factory: Box<dyn RunnerFactory>,
    runners: Mutex<HashMap<String, Arc<dyn BddRunner>>>,
}

impl RunnerRegistry {
    /// Create an empty registry that builds runners with `factory`
    pub fn new<F: RunnerFactory + 'static>(factory: F) -> Self {
        Self {
            factory: Box::new(factory),
            runners: Mutex::default(),
        }
    }

    /// Get the runner for `project`, creating it on first use. A failed creation is not cached,
    /// so the next test case of the project tries again.
    ///
    /// The factory runs without the registry locked. If two cases of a new project race, both may
    /// create a runner, but only the first one stored is ever handed out.
    pub fn runner_for(&self, project: &Project) -> anyhow::Result<Arc<dyn BddRunner>> {
        let cached = self.runners.lock().get(project.name()).cloned();
        if let Some(runner) = cached {
            return Ok(runner);
        }

        debug!(project = project.name(), "creating runner");
        let runner = self.factory.create(project)?;
        Ok(self
            .runners
            .lock()
            .entry(project.name().to_string())
            .or_insert(runner)
            .clone())
    }

    /// Number of live runners
    pub fn len(&self) -> usize {
        self.runners.lock().len()
    }

    /// True if no runner has been created (or all have been shut down)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// End the test run: call [`BddRunner::on_test_run_end`] on every runner and drop them all.
    /// Every runner is notified even if some fail; the first error is returned.
    pub fn shutdown(&self) -> anyhow::Result<()> {
        let runners = std::mem::take(&mut *self.runners.lock());
        let mut result = Ok(());

        for (name, runner) in runners {
            debug!(project = name.as_str(), "ending test run");
            if let Err(e) = runner.on_test_run_end() {
                result = result.and(Err(e.context(format!("Error ending test run for {}", name))));
            }
        }

        result
    }
}
