//! Feature documents
//!
//! A [`DocumentSource`] fetches the parsed document for a feature file. [`GherkinSource`] is the
//! standard implementation: it parses files (or registered source strings) with `gherkin_rust`,
//! converts them to a [`FeatureDocument`], and caches the result per path.

use crate::argument::{StepArgument, Table};
use crate::case::FeatureFile;
use crate::document::{
    Background, ExampleId, ExampleRow, Examples, FeatureDocument, Rule, Scenario,
    ScenarioDefinition, ScenarioOutline, Step, StepKeyword,
};
use anyhow::Context as _;
use async_std::fs;
use async_trait::async_trait;
use gherkin_rust::{Feature, GherkinEnv, StepType};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Produces parsed feature documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the document for `file`. `Ok(None)` means the file was read but holds no feature.
    async fn document(&self, file: &FeatureFile) -> anyhow::Result<Option<Arc<FeatureDocument>>>;
}

/// Parses features from files or source strings, caching each document
pub struct GherkinSource {
    language: String,
    sources: HashMap<PathBuf, String>,
    cache: Mutex<HashMap<PathBuf, Option<Arc<FeatureDocument>>>>,
}

impl Default for GherkinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GherkinSource {
    /// Create a source reading English features from disk
    pub fn new() -> Self {
        Self::with_language("en")
    }

    /// Create a source for features written in another Gherkin dialect
    pub fn with_language<S: Into<String>>(language: S) -> Self {
        Self {
            language: language.into(),
            sources: HashMap::new(),
            cache: Mutex::default(),
        }
    }

    /// Serve `source` for the feature at `path` (the full path, project root included) instead of
    /// reading the file.
    pub fn add_source<P: Into<PathBuf>, S: Into<String>>(
        &mut self,
        path: P,
        source: S,
    ) -> &mut Self {
        self.sources.insert(path.into(), source.into());
        self
    }

    async fn load(&self, path: &Path) -> anyhow::Result<Option<Arc<FeatureDocument>>> {
        let source = match self.sources.get(path) {
            Some(s) => s.clone(),
            None => fs::read_to_string(path)
                .await
                .with_context(|| format!("Could not read {}", path.display()))?,
        };

        if !has_content(&source) {
            return Ok(None);
        }

        let language = declared_language(&source).unwrap_or(&self.language);
        let env = GherkinEnv::new(language)?;
        let mut feature = Feature::parse(&source, env)
            .with_context(|| format!("Could not parse {}", path.display()))?;
        feature.path = Some(path.to_path_buf());

        Ok(Some(Arc::new(convert_feature(feature, language))))
    }
}

#[async_trait]
impl DocumentSource for GherkinSource {
    async fn document(&self, file: &FeatureFile) -> anyhow::Result<Option<Arc<FeatureDocument>>> {
        let path = file.full_path();
        let cached = self.cache.lock().get(&path).cloned();
        if let Some(doc) = cached {
            return Ok(doc);
        }

        // Two cases of the same feature may both parse it. That's harmless; the first insert wins.
        debug!(path = %path.display(), "parsing feature");
        let doc = self.load(&path).await?;
        Ok(self.cache.lock().entry(path).or_insert(doc).clone())
    }
}

/// Anything besides blank lines and comments?
fn has_content(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .any(|l| !l.is_empty() && !l.starts_with('#'))
}

/// The dialect named by a `# language: xx` directive in the comment block before the feature.
fn declared_language(source: &str) -> Option<&str> {
    lazy_static! {
        static ref DIRECTIVE: Regex = Regex::new(r"^#\s*language\s*:\s*([\w-]+)\s*$").unwrap();
    }

    source
        .lines()
        .map(str::trim)
        .take_while(|l| l.is_empty() || l.starts_with('#'))
        .find_map(|l| DIRECTIVE.captures(l))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Convert a parsed feature. Example rows are numbered from 1 within each outline.
pub fn convert_feature(feature: Feature, language: &str) -> FeatureDocument {
    FeatureDocument {
        name: feature.name,
        description: feature.description,
        language: language.to_string(),
        tags: feature.tags,
        background: feature.background.map(|bg| Background {
            steps: convert_steps(bg.steps),
        }),
        scenarios: feature.scenarios.into_iter().map(convert_scenario).collect(),
        rules: feature
            .rules
            .into_iter()
            .map(|rule| Rule {
                name: rule.name,
                tags: rule.tags,
                background: rule.background.map(|bg| Background {
                    steps: convert_steps(bg.steps),
                }),
                scenarios: rule.scenarios.into_iter().map(convert_scenario).collect(),
            })
            .collect(),
        path: feature.path,
    }
}

fn convert_scenario(scenario: gherkin_rust::Scenario) -> ScenarioDefinition {
    let steps = convert_steps(scenario.steps);

    match scenario.examples {
        None => ScenarioDefinition::Scenario(Scenario {
            name: scenario.name,
            description: None,
            tags: scenario.tags,
            steps,
        }),
        Some(examples) => {
            let mut rows = examples.table.rows.into_iter();
            let header = rows.next().unwrap_or_default();
            let rows = rows
                .enumerate()
                .map(|(i, values)| ExampleRow {
                    id: ExampleId::from(i + 1),
                    values,
                })
                .collect();

            ScenarioDefinition::Outline(ScenarioOutline {
                name: scenario.name,
                description: None,
                tags: scenario.tags,
                steps,
                examples: vec![Examples {
                    tags: examples.tags,
                    header,
                    rows,
                }],
            })
        }
    }
}

fn convert_steps(steps: Vec<gherkin_rust::Step>) -> Vec<Step> {
    steps.into_iter().map(convert_step).collect()
}

fn convert_step(step: gherkin_rust::Step) -> Step {
    // gherkin_rust folds And/But into the preceding step's type. Recover them from the keyword.
    let keyword = match step.keyword.trim() {
        "And" => StepKeyword::And,
        "But" => StepKeyword::But,
        _ => match step.ty {
            StepType::Given => StepKeyword::Given,
            StepType::When => StepKeyword::When,
            StepType::Then => StepKeyword::Then,
        },
    };

    let argument = match (step.docstring, step.table) {
        (Some(s), _) => Some(StepArgument::DocString(s)),
        (None, Some(t)) => Some(StepArgument::Table(Table { rows: t.rows })),
        (None, None) => None,
    };

    Step {
        keyword,
        keyword_text: step.keyword,
        text: step.value,
        argument,
    }
}
