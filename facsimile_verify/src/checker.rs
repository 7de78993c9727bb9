// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The equality assertion core.
//!
//! [`Checker`] is the single funnel every comparator goes through. Each call
//! to [`Checker::equals`] or [`Checker::equals_with`] counts as exactly one
//! assertion and produces one [`AssertionRecord`] for the attached sink.
//! Failures are recorded, never raised, so a comparison run always visits
//! the whole tree.

use core::fmt::Debug;

use crate::config::CompareConfig;
use crate::sink::{AssertionRecord, AssertionSink, Gap, ItemVisit, Tally};

/// Records equality checks against an optional sink.
pub struct Checker<'a> {
    sink: Option<&'a mut dyn AssertionSink>,
    config: CompareConfig,
    tally: Tally,
    /// Current item path, e.g. `item.children[0]`.
    path: String,
    /// Lengths of `path` before each [`enter`](Self::enter).
    marks: Vec<usize>,
}

impl Debug for Checker<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Checker")
            .field("sink", &self.sink.is_some())
            .field("config", &self.config)
            .field("tally", &self.tally)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Default for Checker<'_> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<'a> Checker<'a> {
    /// Creates a checker reporting to `sink`, with the default configuration.
    #[must_use]
    pub fn new(sink: &'a mut dyn AssertionSink) -> Self {
        Self {
            sink: Some(sink),
            ..Self::detached()
        }
    }

    /// Creates a checker that only counts.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            sink: None,
            config: CompareConfig::standard(),
            tally: Tally::default(),
            path: String::from("item"),
            marks: Vec::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Counts so far.
    #[must_use]
    pub const fn tally(&self) -> Tally {
        self.tally
    }

    /// Number of passing checks so far.
    #[must_use]
    pub const fn passed(&self) -> u64 {
        self.tally.passed
    }

    /// Number of failing checks so far.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.tally.failed
    }

    /// Whether no check has failed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.tally.is_clean()
    }

    /// The current item path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Asserts strict equality of `actual` and `expected`.
    ///
    /// Returns whether the check passed.
    pub fn equals<T>(&mut self, actual: T, expected: T, message: &str) -> bool
    where
        T: PartialEq + Debug,
    {
        let passed = actual == expected;
        self.record(passed, message, &actual, &expected);
        passed
    }

    /// Evaluates `predicate` and asserts its result equals `expected`.
    ///
    /// When `description` is `None` the message names the enclosing
    /// function of the predicate. The [`check!`](crate::check) macro
    /// supplies the predicate's source text instead.
    pub fn equals_with<T, F>(
        &mut self,
        predicate: F,
        expected: T,
        description: Option<&str>,
    ) -> bool
    where
        T: PartialEq + Debug,
        F: FnOnce() -> T,
    {
        let actual = predicate();
        let passed = actual == expected;
        match description {
            Some(message) => self.record(passed, message, &actual, &expected),
            None => {
                let message = infer_description::<F>();
                self.record(passed, &message, &actual, &expected);
            }
        }
        passed
    }

    /// Appends `segment` to the item path until the matching
    /// [`leave`](Self::leave).
    pub fn enter(&mut self, segment: &str) {
        self.marks.push(self.path.len());
        self.path.push('.');
        self.path.push_str(segment);
    }

    /// Restores the item path saved by the last [`enter`](Self::enter).
    ///
    /// # Panics
    ///
    /// Panics if there is no matching `enter`.
    pub fn leave(&mut self) {
        let mark = self.marks.pop();
        assert!(mark.is_some(), "leave without matching enter");
        if let Some(len) = mark {
            self.path.truncate(len);
        }
    }

    /// Reports a check that was not performed.
    pub fn gap(&mut self, message: &str) {
        self.tally.gaps += 1;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_gap(&Gap {
                path: self.path.clone(),
                message: message.into(),
            });
        }
    }

    pub(crate) fn begin_scenario(&mut self, name: &str) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_scenario_begin(name);
        }
    }

    pub(crate) fn end_scenario(&mut self, name: &str) {
        let tally = self.tally;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_scenario_end(name, &tally);
        }
    }

    pub(crate) fn visit(&mut self, visit: impl FnOnce(&str) -> ItemVisit) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_item(&visit(&self.path));
        }
    }

    fn record(&mut self, passed: bool, message: &str, actual: &dyn Debug, expected: &dyn Debug) {
        let index = self.tally.passed + self.tally.failed;
        if passed {
            self.tally.passed += 1;
        } else {
            self.tally.failed += 1;
        }
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_assertion(&AssertionRecord {
                index,
                path: self.path.clone(),
                message: message.into(),
                actual: format!("{actual:?}"),
                expected: format!("{expected:?}"),
                passed,
            });
        }
    }
}

/// Asserts an expression through [`Checker::equals_with`], using the
/// expression's source text as the message.
///
/// ```
/// use facsimile_verify::{Checker, Report, check};
///
/// let mut report = Report::new();
/// let mut checker = Checker::new(&mut report);
/// let (a, b) = (1, 2);
/// check!(checker, a != b);
/// check!(checker, a + 1, b);
/// check!(checker, a * 2, b, "doubling");
/// drop(checker);
/// assert_eq!(report.records()[0].message, "a != b");
/// assert_eq!(report.records()[1].message, "a + 1");
/// assert_eq!(report.records()[2].message, "doubling");
/// ```
#[macro_export]
macro_rules! check {
    ($checker:expr, $actual:expr $(,)?) => {
        $crate::check!($checker, $actual, true)
    };
    ($checker:expr, $actual:expr, $expected:expr $(,)?) => {
        $checker.equals_with(
            || $actual,
            $expected,
            ::core::option::Option::Some(
                $crate::describe_predicate(::core::stringify!($actual)).as_str(),
            ),
        )
    };
    ($checker:expr, $actual:expr, $expected:expr, $message:expr $(,)?) => {
        $checker.equals_with(|| $actual, $expected, ::core::option::Option::Some($message))
    };
}

/// Turns predicate source text into an assertion message.
///
/// Strips a closure header, wrapping braces and surrounding whitespace,
/// removes 4-space indentation, and drops a leading `return ` together
/// with one trailing `;`.
///
/// ```
/// use facsimile_verify::describe_predicate;
///
/// assert_eq!(describe_predicate("|| { return a == b; }"), "a == b");
/// assert_eq!(describe_predicate("a.len()"), "a.len()");
/// ```
#[must_use]
pub fn describe_predicate(source: &str) -> String {
    let mut body = source.trim();
    body = body.strip_prefix("move ").map_or(body, str::trim_start);
    if let Some(rest) = body.strip_prefix('|')
        && let Some(end) = rest.find('|')
    {
        body = rest[end + 1..].trim_start();
    }
    if let Some(inner) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        body = inner;
    }
    let body = body.replace("    ", "");
    let body = body.trim();
    match body.strip_prefix("return ") {
        Some(ret) => String::from(ret.strip_suffix(';').unwrap_or(ret)),
        None => String::from(body),
    }
}

fn infer_description<F>() -> String {
    let name = core::any::type_name::<F>();
    let name = name.trim_end_matches("::{{closure}}");
    match name.rsplit("::").next() {
        Some(function) if !function.is_empty() => format!("predicate in {function}"),
        _ => String::from("predicate"),
    }
}
