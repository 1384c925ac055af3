//! Locating the scenario a test case refers to
//!
//! Plain scenarios are matched by name. Outline instances are matched by outline name and then by
//! example row id, and materialized by substituting the row's values into every `<placeholder>`.
//! When names repeat within a feature, the first definition wins.

use crate::argument::{StepArgument, Table};
use crate::case::TestCase;
use crate::document::{
    Background, ExampleId, ExampleRow, Examples, FeatureDocument, ScenarioDefinition,
    ScenarioOutline, Step,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

/// A concrete scenario, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScenario {
    /// Scenario name, after substitution
    pub name: String,
    /// Free text following the scenario line
    pub description: Option<String>,
    /// The scenario's own tags, after substitution
    pub tags: Vec<String>,
    /// Tags inherited from the feature and, if any, the enclosing rule
    pub inherited_tags: Vec<String>,
    /// Feature background steps followed by rule background steps
    pub background: Vec<Step>,
    /// The scenario's own steps
    pub steps: Vec<Step>,
}

impl ResolvedScenario {
    /// All tags that apply: inherited tags first, then the scenario's own.
    pub fn tags(&self) -> impl Iterator<Item = &String> {
        self.inherited_tags.iter().chain(self.tags.iter())
    }

    /// Exact, case-sensitive tag membership over inherited and own tags
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }

    /// Background steps followed by the scenario's steps, in execution order
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.background.iter().chain(self.steps.iter())
    }
}

/// Resolve a test case against a document. Returns `None` if the scenario, outline or example
/// row does not exist.
pub fn resolve(document: &FeatureDocument, case: &TestCase) -> Option<ResolvedScenario> {
    match case.example_id() {
        Some(id) => resolve_example(document, case.scenario_name(), id),
        None => resolve_scenario(document, case.scenario_name()),
    }
}

/// Find the first plain scenario with the given name
pub fn resolve_scenario(document: &FeatureDocument, name: &str) -> Option<ResolvedScenario> {
    definitions(document).find_map(|(scope, definition)| match definition {
        ScenarioDefinition::Scenario(s) if s.name == name => Some(ResolvedScenario {
            name: s.name.clone(),
            description: s.description.clone(),
            tags: s.tags.clone(),
            inherited_tags: scope.tags(document),
            background: scope.background(document),
            steps: s.steps.clone(),
        }),
        _ => None,
    })
}

/// Find the first outline with the given name, then its example row with the given id.
pub fn resolve_example(
    document: &FeatureDocument,
    outline: &str,
    id: &ExampleId,
) -> Option<ResolvedScenario> {
    let (scope, template) =
        definitions(document).find_map(|(scope, definition)| match definition {
            ScenarioDefinition::Outline(o) if o.name == outline => Some((scope, o)),
            _ => None,
        })?;

    let (examples, row) = template.example(id)?;
    let mut resolved = materialize(template, examples, row);
    resolved.inherited_tags = scope.tags(document);
    resolved.background = scope.background(document);
    Some(resolved)
}

/// Build a concrete scenario from an outline and one of its example rows. The scenario's own tags
/// are the outline's followed by the example block's. Inherited tags and background are left
/// empty; [`resolve_example`] fills them in.
pub fn materialize(
    outline: &ScenarioOutline,
    examples: &Examples,
    row: &ExampleRow,
) -> ResolvedScenario {
    let subst = |s: &str| substitute(s, &examples.header, &row.values).into_owned();

    ResolvedScenario {
        name: subst(&outline.name),
        description: outline.description.clone(),
        tags: outline
            .tags
            .iter()
            .chain(examples.tags.iter())
            .map(|t| subst(t))
            .collect(),
        inherited_tags: vec![],
        background: vec![],
        steps: outline
            .steps
            .iter()
            .map(|step| Step {
                keyword: step.keyword,
                keyword_text: step.keyword_text.clone(),
                text: subst(&step.text),
                argument: step.argument.as_ref().map(|arg| match arg {
                    StepArgument::DocString(s) => StepArgument::DocString(subst(s)),
                    StepArgument::Table(t) => StepArgument::Table(Table {
                        rows: t
                            .rows
                            .iter()
                            .map(|r| r.iter().map(|c| subst(c)).collect())
                            .collect(),
                    }),
                }),
            })
            .collect(),
    }
}

/// Replace every `<name>` in `text` with the value of the column called `name`. Placeholders
/// naming no column are left as they are.
pub fn substitute<'a>(text: &'a str, header: &[String], values: &[String]) -> Cow<'a, str> {
    lazy_static! {
        static ref BRACKET: Regex = Regex::new("<[^>]+>").unwrap();
    }

    BRACKET.replace_all(text, |caps: &regex::Captures<'_>| {
        let m = &caps[0];
        let key = &m[1..m.len() - 1];
        header
            .iter()
            .position(|h| h == key)
            .and_then(|idx| values.get(idx))
            .map_or_else(|| m.to_string(), Clone::clone)
    })
}

/// Where a definition sits: directly under the feature, or inside a rule
#[derive(Clone, Copy)]
enum Scope {
    Feature,
    Rule(usize),
}

impl Scope {
    fn tags(self, document: &FeatureDocument) -> Vec<String> {
        let mut tags = document.tags.clone();
        if let Scope::Rule(i) = self {
            tags.extend(document.rules[i].tags.iter().cloned());
        }
        tags
    }

    fn background(self, document: &FeatureDocument) -> Vec<Step> {
        let steps = |bg: &Option<Background>| {
            bg.iter()
                .flat_map(|b| b.steps.iter().cloned())
                .collect::<Vec<_>>()
        };
        let mut background = steps(&document.background);
        if let Scope::Rule(i) = self {
            background.extend(steps(&document.rules[i].background));
        }
        background
    }
}

/// All scenario definitions in document order: those directly under the feature, then each
/// rule's.
fn definitions(
    document: &FeatureDocument,
) -> impl Iterator<Item = (Scope, &ScenarioDefinition)> {
    let top = document.scenarios.iter().map(|d| (Scope::Feature, d));
    let rules = document
        .rules
        .iter()
        .enumerate()
        .flat_map(|(i, r)| r.scenarios.iter().map(move |d| (Scope::Rule(i), d)));
    top.chain(rules)
}
