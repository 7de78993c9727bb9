// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON report exporter.

use std::io::{self, Write};

use serde_json::{Value, json};

use facsimile_verify::Report;

/// Exports a collected report as a JSON document.
///
/// The document has three members: `summary` with pass, fail, gap and
/// visited-item counts, `assertions` with one object per record in the
/// order they were made, and `gaps` listing skipped checks.
pub fn export(report: &Report, writer: &mut dyn Write) -> io::Result<()> {
    let tally = report.tally();
    let assertions: Vec<Value> = report
        .records()
        .iter()
        .map(|r| {
            json!({
                "index": r.index,
                "path": r.path,
                "message": r.message,
                "passed": r.passed,
                "actual": r.actual,
                "expected": r.expected,
            })
        })
        .collect();
    let gaps: Vec<Value> = report
        .gaps()
        .iter()
        .map(|g| {
            json!({
                "path": g.path,
                "message": g.message,
            })
        })
        .collect();

    let document = json!({
        "summary": {
            "passed": tally.passed,
            "failed": tally.failed,
            "gaps": tally.gaps,
            "visited": report.visited(),
            "clean": tally.is_clean(),
        },
        "assertions": assertions,
        "gaps": gaps,
    });
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
