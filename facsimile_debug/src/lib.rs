// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for facsimile verification reports.
//!
//! This crate provides outputs for development and CI:
//!
//! - [`pretty::PrettyPrintSink`]: an
//!   [`AssertionSink`](facsimile_verify::AssertionSink) writing one
//!   human-readable line per event.
//! - [`json::export`]: writes a collected
//!   [`Report`](facsimile_verify::Report) as a JSON document.

pub mod json;
pub mod pretty;
