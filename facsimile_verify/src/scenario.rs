// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clone verification and scoped scenarios.

use facsimile_scene::item::{ItemId, Project};

use crate::checker::Checker;
use crate::config::CompareConfig;
use crate::sink::AssertionSink;

impl Checker<'_> {
    /// Copies `item`, compares the copy against it, then removes the copy.
    ///
    /// The project is left with the same live items it had before the call.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clone_and_compare(&mut self, project: &mut Project, item: ItemId) {
        let copy = project.clone_item(item);
        self.compare_items(project, item, copy);
        project.remove(copy);
    }
}

/// A named verification run over a project it owns.
///
/// Every run gets a fresh [`Project`]. The project is dropped when the body
/// returns or unwinds, so nothing built inside a scenario outlives it.
///
/// ```
/// use facsimile_verify::{Report, Scenario};
///
/// let mut report = Report::new();
/// let tally = Scenario::new("empty group").run(&mut report, |project, checker| {
///     let group = project.create_group();
///     checker.clone_and_compare(project, group);
///     checker.tally()
/// });
/// assert!(tally.is_clean());
/// assert!(report.is_clean());
/// ```
#[derive(Clone, Debug)]
pub struct Scenario {
    name: String,
    config: CompareConfig,
}

impl Scenario {
    /// Creates a scenario with the default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: CompareConfig::standard(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    /// The scenario's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs `body` against a fresh project, reporting to `sink`.
    ///
    /// The sink sees [`on_scenario_begin`](AssertionSink::on_scenario_begin)
    /// before the body and
    /// [`on_scenario_end`](AssertionSink::on_scenario_end) once the project
    /// is dropped, whether the body returns or unwinds.
    pub fn run<R>(
        &self,
        sink: &mut dyn AssertionSink,
        body: impl FnOnce(&mut Project, &mut Checker<'_>) -> R,
    ) -> R {
        let mut scope = ScenarioScope {
            checker: Checker::new(sink).with_config(self.config),
            name: &self.name,
        };
        scope.checker.begin_scenario(&self.name);
        let mut project = Project::new();
        let result = body(&mut project, &mut scope.checker);
        drop(project);
        drop(scope);
        result
    }
}

/// Sends the end event when dropped.
struct ScenarioScope<'a, 'n> {
    checker: Checker<'a>,
    name: &'n str,
}

impl Drop for ScenarioScope<'_, '_> {
    fn drop(&mut self) {
        self.checker.end_scenario(self.name);
    }
}
