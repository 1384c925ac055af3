//! The parsed feature document consumed by the bridge.
//!
//! This is deliberately a plain data model. Documents are produced by a
//! [`crate::source::DocumentSource`] and are never mutated afterwards; concrete scenarios are
//! derived from them by [`crate::resolve`].

use crate::argument::StepArgument;
use std::fmt;
use std::path::PathBuf;

/// A parsed feature file
#[derive(Debug, Clone, Default)]
pub struct FeatureDocument {
    /// The feature's name
    pub name: String,
    /// Free text following the feature line
    pub description: Option<String>,
    /// The language tag the feature was written in (e.g., "en" or "de-AT")
    pub language: String,
    /// Feature-level tags, without the leading '@'
    pub tags: Vec<String>,
    /// Steps run before every scenario in the feature
    pub background: Option<Background>,
    /// Scenario definitions directly under the feature, in file order
    pub scenarios: Vec<ScenarioDefinition>,
    /// Rules, in file order
    pub rules: Vec<Rule>,
    /// Where the document came from, if known
    pub path: Option<PathBuf>,
}

/// A rule groups scenarios within a feature and may add its own background.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    /// The rule's name
    pub name: String,
    /// Rule-level tags
    pub tags: Vec<String>,
    /// Steps run after the feature background for scenarios in this rule
    pub background: Option<Background>,
    /// Scenario definitions in the rule, in file order
    pub scenarios: Vec<ScenarioDefinition>,
}

/// A background section
#[derive(Debug, Clone, Default)]
pub struct Background {
    /// The background's steps
    pub steps: Vec<Step>,
}

/// A scenario or a scenario outline
#[derive(Debug, Clone)]
pub enum ScenarioDefinition {
    /// A plain scenario
    Scenario(Scenario),
    /// A scenario outline with examples
    Outline(ScenarioOutline),
}

impl ScenarioDefinition {
    /// The name as written
    pub fn name(&self) -> &str {
        match self {
            ScenarioDefinition::Scenario(s) => &s.name,
            ScenarioDefinition::Outline(o) => &o.name,
        }
    }
}

/// A plain scenario
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// The scenario's name
    pub name: String,
    /// Free text following the scenario line
    pub description: Option<String>,
    /// Scenario-level tags
    pub tags: Vec<String>,
    /// Steps, in file order
    pub steps: Vec<Step>,
}

/// A scenario outline. Its name, tags and steps may contain `<placeholder>`s that are filled in
/// from an example row.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutline {
    /// The outline's name
    pub name: String,
    /// Free text following the outline line
    pub description: Option<String>,
    /// Outline-level tags
    pub tags: Vec<String>,
    /// Template steps
    pub steps: Vec<Step>,
    /// Example blocks
    pub examples: Vec<Examples>,
}

impl ScenarioOutline {
    /// Find the example row with the given id, along with the block it belongs to.
    pub fn example(&self, id: &ExampleId) -> Option<(&Examples, &ExampleRow)> {
        self.examples
            .iter()
            .find_map(|e| e.rows.iter().find(|r| r.id == *id).map(|r| (e, r)))
    }
}

/// An example table under an outline
#[derive(Debug, Clone, Default)]
pub struct Examples {
    /// Tags on the `Examples:` block, without the leading '@'
    pub tags: Vec<String>,
    /// Column names, which are also placeholder names
    pub header: Vec<String>,
    /// Data rows
    pub rows: Vec<ExampleRow>,
}

/// One row of an example table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRow {
    /// Stable identifier, unique within the owning outline
    pub id: ExampleId,
    /// Cell values, positionally matching [`Examples::header`]
    pub values: Vec<String>,
}

/// Identifies an example row within its outline. Assigned during discovery; the bridge only
/// looks them up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExampleId(String);

impl ExampleId {
    /// Create an id from any string
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// The id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<usize> for ExampleId {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for ExampleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The grammatical role of a step. Conjunctions keep their own role so the runner can tell them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    #[allow(missing_docs)]
    Given,
    #[allow(missing_docs)]
    When,
    #[allow(missing_docs)]
    Then,
    #[allow(missing_docs)]
    And,
    #[allow(missing_docs)]
    But,
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        };
        f.write_str(s)
    }
}

/// A single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Role of the step
    pub keyword: StepKeyword,
    /// The keyword exactly as written, which may be localized
    pub keyword_text: String,
    /// The step text following the keyword
    pub text: String,
    /// Doc string or table, if any
    pub argument: Option<StepArgument>,
}

impl Step {
    /// Create a step with no argument, using the English keyword text
    pub fn new<S: Into<String>>(keyword: StepKeyword, text: S) -> Self {
        Self {
            keyword,
            keyword_text: format!("{} ", keyword),
            text: text.into(),
            argument: None,
        }
    }

    /// Attach an argument
    pub fn with_argument(mut self, argument: StepArgument) -> Self {
        self.argument = Some(argument);
        self
    }
}
