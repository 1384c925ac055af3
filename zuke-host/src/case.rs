//! Test case descriptors handed over by the host's discovery phase

use crate::document::ExampleId;
use std::fmt;
use std::path::{Path, PathBuf};

/// The project (implementation assembly) that owns a set of features and their step bindings.
/// Runners are shared per project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Project {
    name: String,
    root: PathBuf,
}

impl Project {
    /// Create a project. `name` identifies the step bindings; `root` is the directory feature
    /// paths are relative to.
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, root: P) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// The project's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory feature paths are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A reference to a feature file within a project
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureFile {
    project: Project,
    path: PathBuf,
}

impl FeatureFile {
    /// Create a feature file reference. `path` is relative to the project root.
    pub fn new<P: Into<PathBuf>>(project: Project, path: P) -> Self {
        Self {
            project,
            path: path.into(),
        }
    }

    /// The owning project
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Path relative to the project root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path joined onto the project root
    pub fn full_path(&self) -> PathBuf {
        self.project.root.join(&self.path)
    }

    /// The folder the feature lives in, relative to the project root
    pub fn folder(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl fmt::Display for FeatureFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project.name, self.path.display())
    }
}

/// One test case as the host sees it: a single scenario, or a single example row of an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    feature: FeatureFile,
    scenario: String,
    example: Option<ExampleId>,
    display_name: String,
}

impl TestCase {
    /// A plain scenario, looked up by name
    pub fn scenario<S: Into<String>>(feature: FeatureFile, scenario: S) -> Self {
        let scenario = scenario.into();
        Self {
            feature,
            display_name: scenario.clone(),
            scenario,
            example: None,
        }
    }

    /// One example row of the named scenario outline
    pub fn example<S: Into<String>, I: Into<ExampleId>>(
        feature: FeatureFile,
        outline: S,
        id: I,
    ) -> Self {
        let scenario = outline.into();
        let id = id.into();
        Self {
            feature,
            display_name: format!("{} [{}]", scenario, id),
            scenario,
            example: Some(id),
        }
    }

    /// Override the name shown to the user
    pub fn with_display_name<S: Into<String>>(mut self, name: S) -> Self {
        self.display_name = name.into();
        self
    }

    /// The feature file containing the scenario
    pub fn feature(&self) -> &FeatureFile {
        &self.feature
    }

    /// Scenario or outline name
    pub fn scenario_name(&self) -> &str {
        &self.scenario
    }

    /// Is this an instance of a scenario outline?
    pub fn is_outline(&self) -> bool {
        self.example.is_some()
    }

    /// The example row, for outline instances
    pub fn example_id(&self) -> Option<&ExampleId> {
        self.example.as_ref()
    }

    /// Name shown to the user
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Identity used in host messages
    pub fn unique_id(&self) -> String {
        match &self.example {
            Some(id) => format!("{}::{}#{}", self.feature, self.scenario, id),
            None => format!("{}::{}", self.feature, self.scenario),
        }
    }
}
