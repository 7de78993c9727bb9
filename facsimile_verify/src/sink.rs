// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assertion records and the sinks that receive them.
//!
//! Every check made through a [`Checker`](crate::Checker) produces exactly
//! one [`AssertionRecord`], delivered to an [`AssertionSink`]. All sink
//! methods default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Report`] is the collecting sink used by tests; `facsimile_debug`
//! provides printing and JSON-exporting sinks.

use facsimile_scene::item::{ItemKind, ItemSerial};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// The outcome of one equality check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertionRecord {
    /// Position of this record within its checker, starting at 0.
    pub index: u64,
    /// Item path at which the check was made, e.g. `item.children[1]`.
    pub path: String,
    /// Human-readable description of the check.
    pub message: String,
    /// `Debug` rendering of the actual value.
    pub actual: String,
    /// `Debug` rendering of the expected value.
    pub expected: String,
    /// Whether `actual` equalled `expected`.
    pub passed: bool,
}

/// Emitted when the structural comparator starts on an item pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemVisit {
    /// Item path of the pair.
    pub path: String,
    /// Variant of the original.
    pub kind: ItemKind,
    /// Serial of the original.
    pub original: ItemSerial,
    /// Serial of the copy.
    pub clone: ItemSerial,
}

/// A check that was deliberately not performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gap {
    /// Item path at which the check was skipped.
    pub path: String,
    /// What was skipped.
    pub message: String,
}

/// Pass, fail and gap counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Checks that passed.
    pub passed: u64,
    /// Checks that failed.
    pub failed: u64,
    /// Checks that were skipped.
    pub gaps: u64,
}

impl Tally {
    /// Whether no check failed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

// ---------------------------------------------------------------------------
// AssertionSink trait
// ---------------------------------------------------------------------------

/// Receives assertion outcomes and comparator progress.
pub trait AssertionSink {
    /// Called once per equality check.
    fn on_assertion(&mut self, record: &AssertionRecord) {
        _ = record;
    }

    /// Called when the structural comparator enters an item pair.
    fn on_item(&mut self, visit: &ItemVisit) {
        _ = visit;
    }

    /// Called when a check is skipped by configuration.
    fn on_gap(&mut self, gap: &Gap) {
        _ = gap;
    }

    /// Called when a [`Scenario`](crate::Scenario) starts.
    fn on_scenario_begin(&mut self, name: &str) {
        _ = name;
    }

    /// Called when a [`Scenario`](crate::Scenario) body returns.
    fn on_scenario_end(&mut self, name: &str, tally: &Tally) {
        _ = (name, tally);
    }
}

/// A sink that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl AssertionSink for NoopSink {}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A sink that keeps every record.
#[derive(Clone, Debug, Default)]
pub struct Report {
    records: Vec<AssertionRecord>,
    gaps: Vec<Gap>,
    visited: usize,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in the order they were made.
    #[must_use]
    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    /// Failing records in the order they were made.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionRecord> {
        self.records.iter().filter(|r| !r.passed)
    }

    /// Skipped checks.
    #[must_use]
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    /// Number of item pairs the structural comparator visited.
    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }

    /// Number of passing records.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }

    /// Number of failing records.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Counts of passed, failed and skipped checks.
    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally {
            passed: self.passed() as u64,
            failed: self.failed() as u64,
            gaps: self.gaps.len() as u64,
        }
    }

    /// Whether no check failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.records.iter().all(|r| r.passed)
    }

    /// Returns the first record whose message equals `message`.
    #[must_use]
    pub fn find(&self, message: &str) -> Option<&AssertionRecord> {
        self.records.iter().find(|r| r.message == message)
    }
}

impl AssertionSink for Report {
    fn on_assertion(&mut self, record: &AssertionRecord) {
        self.records.push(record.clone());
    }

    fn on_item(&mut self, _visit: &ItemVisit) {
        self.visited += 1;
    }

    fn on_gap(&mut self, gap: &Gap) {
        self.gaps.push(gap.clone());
    }
}
