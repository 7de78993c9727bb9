// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural clone verification for facsimile scene graphs.
//!
//! `facsimile_verify` checks that copying an item produced a value-equal
//! but reference-distinct tree. It provides:
//!
//! - **Checker**: the single assertion funnel. Every comparison records one
//!   [`AssertionRecord`] per check and never stops early.
//! - **Comparators**: tolerance comparison of numbers
//!   ([`Checker::compare_numbers`]), points, rectangles and colors, and the
//!   recursive [`Checker::compare_items`].
//! - **Driver**: [`Checker::clone_and_compare`] copies an item, compares,
//!   and discards the copy.
//! - **Scenarios**: [`Scenario`] runs a body against a fresh project that is
//!   torn down afterwards.
//! - **Sinks**: [`AssertionSink`] receives records; [`Report`] collects
//!   them, [`NoopSink`] discards them.
//!
//! # Example
//!
//! ```
//! use facsimile_scene::color::Color;
//! use facsimile_scene::item::{Project, Segment};
//! use facsimile_scene::paint::Paint;
//! use facsimile_verify::{Checker, Report};
//! use kurbo::Point;
//!
//! let mut project = Project::new();
//! let path = project.create_path(vec![
//!     Segment::corner(Point::new(0.0, 0.0)),
//!     Segment::corner(Point::new(10.0, 0.0)),
//!     Segment::corner(Point::new(10.0, 10.0)),
//! ]);
//! let red: Color = "#ff0000".parse().unwrap();
//! project.set_fill_color(path, Some(Paint::Color(red)));
//!
//! let mut report = Report::new();
//! let mut checker = Checker::new(&mut report);
//! checker.clone_and_compare(&mut project, path);
//! drop(checker);
//!
//! assert!(report.is_clean());
//! assert!(report.find("fill_color is not shared").is_some());
//! ```

mod checker;
mod composite;
mod config;
mod numeric;
mod scenario;
mod sink;
mod structural;

pub use checker::{Checker, describe_predicate};
pub use config::{CompareConfig, GradientPolicy};
pub use numeric::round_to;
pub use scenario::Scenario;
pub use sink::{AssertionRecord, AssertionSink, Gap, ItemVisit, NoopSink, Report, Tally};
