// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable assertion output.
//!
//! [`PrettyPrintSink`] implements [`AssertionSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use facsimile_verify::{AssertionRecord, AssertionSink, Gap, ItemVisit, Tally};

/// Writes human-readable assertion lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    passes: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            passes: true,
        }
    }

    /// Sets whether passing assertions are printed. Failures always are.
    #[must_use]
    pub fn show_passes(mut self, passes: bool) -> Self {
        self.passes = passes;
        self
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AssertionSink for PrettyPrintSink<W> {
    fn on_assertion(&mut self, r: &AssertionRecord) {
        if r.passed {
            if self.passes {
                let _ = writeln!(self.writer, "[pass] #{} {}: {}", r.index, r.path, r.message);
            }
        } else {
            let _ = writeln!(
                self.writer,
                "[FAIL] #{} {}: {} actual={} expected={}",
                r.index, r.path, r.message, r.actual, r.expected,
            );
        }
    }

    fn on_item(&mut self, v: &ItemVisit) {
        let _ = writeln!(
            self.writer,
            "[item] {} {} original={:?} clone={:?}",
            v.path,
            v.kind.name(),
            v.original,
            v.clone,
        );
    }

    fn on_gap(&mut self, g: &Gap) {
        let _ = writeln!(self.writer, "[gap] {}: {}", g.path, g.message);
    }

    fn on_scenario_begin(&mut self, name: &str) {
        let _ = writeln!(self.writer, "[scenario:begin] {name}");
    }

    fn on_scenario_end(&mut self, name: &str, t: &Tally) {
        let verdict = if t.is_clean() { "ok" } else { "FAILED" };
        let _ = writeln!(
            self.writer,
            "[scenario:end] {name} passed={} failed={} gaps={} {verdict}",
            t.passed, t.failed, t.gaps,
        );
    }
}
